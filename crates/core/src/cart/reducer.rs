//! The cart reducer: `(state, action) -> state`.
//!
//! Transitions never mutate the incoming state; each one builds a new
//! [`CartState`] through [`CartState::derive`] so the totals can never drift
//! from the items and coupons they are computed from. Every transition that
//! changes the cart is written to durable storage before it is returned.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::storage::{self, DurableStore, StorageKey};
use crate::types::{Coupon, CouponId, Product};

use super::action::CartAction;
use super::state::{CartItem, CartState, ShippingPolicy};

/// Applies [`CartAction`]s to cart state and persists the result.
#[derive(Clone)]
pub struct CartReducer {
    store: Arc<dyn DurableStore>,
    shipping: ShippingPolicy,
}

impl fmt::Debug for CartReducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartReducer")
            .field("shipping", &self.shipping)
            .finish_non_exhaustive()
    }
}

impl CartReducer {
    /// Create a reducer persisting to `store` with the default shipping policy.
    #[must_use]
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self {
            store,
            shipping: ShippingPolicy::default(),
        }
    }

    /// Use a custom shipping policy.
    #[must_use]
    pub fn with_shipping(mut self, shipping: ShippingPolicy) -> Self {
        self.shipping = shipping;
        self
    }

    /// The shipping policy totals are computed with.
    #[must_use]
    pub const fn shipping(&self) -> &ShippingPolicy {
        &self.shipping
    }

    /// Read the persisted cart, or an empty one if nothing usable is stored.
    ///
    /// Stored totals are never trusted: items with a zero amount are dropped,
    /// only the first entry per product and per coupon is kept, and the
    /// totals are derived again under this reducer's shipping policy.
    #[must_use]
    pub fn hydrate(&self) -> CartState {
        let stored: CartState =
            storage::load_json(self.store.as_ref(), StorageKey::ShoppingCart).unwrap_or_default();
        let (items, coupons) = stored.into_parts();

        let mut seen_products = HashSet::new();
        let items: Vec<CartItem> = items
            .into_iter()
            .filter(|item| item.amount > 0 && seen_products.insert(item.product.id.clone()))
            .collect();

        let mut seen_coupons = HashSet::new();
        let coupons: Vec<Coupon> = coupons
            .into_iter()
            .filter(|coupon| seen_coupons.insert(coupon.id.clone()))
            .collect();

        CartState::derive(items, coupons, &self.shipping)
    }

    /// Apply `action` to `state`.
    ///
    /// When `state` is `None` the persisted cart is used as the starting
    /// point. `PRODUCTS_LOADED` always starts from the persisted cart,
    /// whatever `state` holds. Actions that leave the cart unchanged return
    /// the starting state and do not write to storage.
    #[must_use]
    pub fn reduce(&self, state: Option<CartState>, action: CartAction) -> CartState {
        let kind = action.kind();
        let current = match state {
            Some(state) if !matches!(action, CartAction::ProductsLoaded(_)) => state,
            _ => self.hydrate(),
        };

        match self.transition(&current, action) {
            Some(next) => {
                self.persist(kind, &next);
                next
            }
            None => {
                tracing::trace!(action = kind, "Cart action left state unchanged");
                current
            }
        }
    }

    /// Compute the next state, or `None` if the action is a no-op.
    fn transition(&self, state: &CartState, action: CartAction) -> Option<CartState> {
        match action {
            CartAction::AddItem(product) => Some(self.add_item(state, product)),
            CartAction::SetAmount { product, amount } => self.set_amount(state, &product, amount),
            CartAction::AddCoupon(coupon) => self.add_coupon(state, coupon),
            CartAction::RemoveCoupon(coupon_id) => self.remove_coupon(state, &coupon_id),
            CartAction::ProductsLoaded(products) => Some(self.reconcile(state, &products)),
            CartAction::Other => None,
        }
    }

    fn add_item(&self, state: &CartState, product: Product) -> CartState {
        let (mut items, coupons) = state.clone().into_parts();

        match items.iter_mut().find(|item| item.product.id == product.id) {
            Some(item) => item.amount = item.amount.saturating_add(1),
            None => items.push(CartItem { product, amount: 1 }),
        }

        CartState::derive(items, coupons, &self.shipping)
    }

    fn set_amount(&self, state: &CartState, product: &Product, amount: i64) -> Option<CartState> {
        let (mut items, coupons) = state.clone().into_parts();
        let index = items
            .iter()
            .position(|item| item.product.id == product.id)?;

        if amount <= 0 {
            items.remove(index);
        } else if let Some(item) = items.get_mut(index) {
            item.amount = u32::try_from(amount).unwrap_or(u32::MAX);
        }

        Some(CartState::derive(items, coupons, &self.shipping))
    }

    fn add_coupon(&self, state: &CartState, coupon: Coupon) -> Option<CartState> {
        if state.has_coupon(&coupon.id) {
            return None;
        }

        let (items, mut coupons) = state.clone().into_parts();
        coupons.push(coupon);
        Some(CartState::derive(items, coupons, &self.shipping))
    }

    fn remove_coupon(&self, state: &CartState, coupon_id: &CouponId) -> Option<CartState> {
        if !state.has_coupon(coupon_id) {
            return None;
        }

        let (items, mut coupons) = state.clone().into_parts();
        coupons.retain(|coupon| &coupon.id != coupon_id);
        Some(CartState::derive(items, coupons, &self.shipping))
    }

    /// Swap every item's product for its freshly loaded version, dropping
    /// items whose product no longer exists.
    fn reconcile(&self, state: &CartState, products: &[Product]) -> CartState {
        let (stored_items, coupons) = state.clone().into_parts();
        let before = stored_items.len();

        let items: Vec<CartItem> = stored_items
            .into_iter()
            .filter_map(|item| {
                products
                    .iter()
                    .find(|product| product.id == item.product.id)
                    .map(|product| CartItem {
                        product: product.clone(),
                        amount: item.amount,
                    })
            })
            .collect();

        if items.len() < before {
            tracing::info!(
                dropped = before - items.len(),
                "Removed cart items no longer in the catalog"
            );
        }

        CartState::derive(items, coupons, &self.shipping)
    }

    fn persist(&self, kind: &str, state: &CartState) {
        if let Err(e) = storage::store_json(self.store.as_ref(), StorageKey::ShoppingCart, state) {
            tracing::warn!(action = kind, error = %e, "Failed to persist cart");
            return;
        }

        tracing::debug!(
            action = kind,
            items = state.items().len(),
            item_total = %state.item_total(),
            total = %state.total(),
            "Cart updated"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StorageError};
    use crate::types::{Price, ProductText};
    use serde_json::Value;

    fn price(s: &str) -> Price {
        s.parse().unwrap()
    }

    fn product(id: &str, unit_price: &str) -> Product {
        Product::new(id, price(unit_price))
    }

    fn reducer() -> (CartReducer, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (CartReducer::new(store.clone()), store)
    }

    fn cart_with(reducer: &CartReducer, items: &[(&str, &str, u32)]) -> CartState {
        let items = items
            .iter()
            .map(|(id, unit_price, amount)| CartItem {
                product: product(id, unit_price),
                amount: *amount,
            })
            .collect();
        CartState::derive(items, Vec::new(), reducer.shipping())
    }

    /// Store that counts writes and can be told to fail.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: std::sync::atomic::AtomicUsize,
        fail: bool,
    }

    impl DurableStore for CountingStore {
        fn load(&self, key: StorageKey) -> Option<Value> {
            self.inner.load(key)
        }

        fn store(&self, key: StorageKey, value: Value) -> Result<(), StorageError> {
            self.writes
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if self.fail {
                return Err(StorageError::Poisoned);
            }
            self.inner.store(key, value)
        }
    }

    // =========================================================================
    // ADD_ITEM
    // =========================================================================

    #[test]
    fn test_add_item_appends_with_amount_one() {
        let (reducer, _) = reducer();

        let result = reducer.reduce(
            Some(CartState::default()),
            CartAction::AddItem(product("product1", "0")),
        );

        assert_eq!(result.items().len(), 1);
        assert_eq!(result.items()[0].amount, 1);
        assert_eq!(result.items()[0].product.id.as_str(), "product1");
    }

    #[test]
    fn test_add_item_increments_existing() {
        let (reducer, _) = reducer();
        let state = cart_with(&reducer, &[("product1", "1", 2), ("product2", "3", 1)]);

        let result = reducer.reduce(Some(state), CartAction::AddItem(product("product1", "1")));

        assert_eq!(result.items().len(), 2);
        assert_eq!(result.items()[0].amount, 3);
        assert_eq!(result.items()[1].amount, 1);
        assert_eq!(result.items()[1].product.id.as_str(), "product2");
    }

    #[test]
    fn test_add_item_total_is_exact() {
        let (reducer, _) = reducer();
        let state = cart_with(&reducer, &[("product1", "0.1", 2)]);

        let result = reducer.reduce(Some(state), CartAction::AddItem(product("product2", "0.1")));

        assert_eq!(result.item_total(), price("0.3"));
    }

    #[test]
    fn test_add_item_adds_shipping_under_threshold() {
        let (reducer, _) = reducer();
        let state = cart_with(&reducer, &[("product1", "49", 1)]);

        let result = reducer.reduce(
            Some(state),
            CartAction::AddItem(product("product2", "0.95")),
        );

        assert_eq!(result.item_total(), price("49.95"));
        assert_eq!(result.total(), price("58.95"));
        assert!(result.has_shipping_costs());
    }

    #[test]
    fn test_add_item_distinct_products() {
        let (reducer, _) = reducer();
        let prices = ["1.10", "2.20", "3.30", "4.40"];

        let mut state = CartState::default();
        for (i, unit_price) in prices.iter().enumerate() {
            state = reducer.reduce(
                Some(state),
                CartAction::AddItem(product(&format!("p{i}"), unit_price)),
            );
        }

        assert_eq!(state.items().len(), prices.len());
        assert_eq!(state.item_total(), price("11"));
    }

    // =========================================================================
    // SET_AMOUNT
    // =========================================================================

    #[test]
    fn test_set_amount_zero_removes_item() {
        let (reducer, _) = reducer();
        let state = cart_with(&reducer, &[("product1", "0", 1)]);

        let result = reducer.reduce(
            Some(state),
            CartAction::SetAmount {
                product: product("product1", "0"),
                amount: 0,
            },
        );

        assert!(result.items().is_empty());
    }

    #[test]
    fn test_set_amount_negative_removes_item() {
        let (reducer, _) = reducer();
        let state = cart_with(&reducer, &[("product1", "5", 1), ("product2", "5", 1)]);

        let result = reducer.reduce(
            Some(state),
            CartAction::SetAmount {
                product: product("product1", "5"),
                amount: -3,
            },
        );

        assert_eq!(result.items().len(), 1);
        assert_eq!(result.items()[0].product.id.as_str(), "product2");
    }

    #[test]
    fn test_set_amount_is_absolute() {
        let (reducer, _) = reducer();
        let state = cart_with(&reducer, &[("product1", "0", 2)]);

        let result = reducer.reduce(
            Some(state),
            CartAction::SetAmount {
                product: product("product1", "0"),
                amount: 1,
            },
        );

        assert_eq!(result.items().len(), 1);
        assert_eq!(result.items()[0].amount, 1);
    }

    #[test]
    fn test_set_amount_recalculates_totals() {
        let (reducer, _) = reducer();
        let state = cart_with(&reducer, &[("product1", "12.5", 2)]);

        let result = reducer.reduce(
            Some(state),
            CartAction::SetAmount {
                product: product("product1", "12.5"),
                amount: 4,
            },
        );

        assert_eq!(result.item_total(), price("50"));
        assert_eq!(result.total(), price("50"));
        assert!(!result.has_shipping_costs());
    }

    #[test]
    fn test_set_amount_last_item_clears_shipping() {
        let (reducer, _) = reducer();
        let state = cart_with(&reducer, &[("product1", "12.5", 1)]);
        assert!(state.has_shipping_costs());
        assert_eq!(state.total(), price("21.5"));

        let result = reducer.reduce(
            Some(state),
            CartAction::SetAmount {
                product: product("product1", "12.5"),
                amount: 0,
            },
        );

        assert_eq!(result.item_total(), Price::ZERO);
        assert_eq!(result.total(), Price::ZERO);
        assert!(!result.has_shipping_costs());
    }

    #[test]
    fn test_set_amount_unknown_product_is_noop() {
        let (reducer, store) = reducer();
        let state = cart_with(&reducer, &[("product1", "5", 1)]);

        let result = reducer.reduce(
            Some(state.clone()),
            CartAction::SetAmount {
                product: product("ghost", "5"),
                amount: 3,
            },
        );

        assert_eq!(result, state);
        assert!(store.load(StorageKey::ShoppingCart).is_none());
    }

    // =========================================================================
    // ADD_COUPON / REMOVE_COUPON
    // =========================================================================

    #[test]
    fn test_add_coupon_to_hydrated_cart() {
        let (reducer, _) = reducer();

        let result = reducer.reduce(
            None,
            CartAction::AddCoupon(Coupon::new("ABCD-EFGH-IJKL-MNOP", price("10"))),
        );

        assert_eq!(result.coupons().len(), 1);
        assert_eq!(result.coupons()[0].id.as_str(), "ABCD-EFGH-IJKL-MNOP");
        assert_eq!(result.coupons()[0].amount, price("10"));
    }

    #[test]
    fn test_add_coupon_subtracts_from_total() {
        let (reducer, _) = reducer();
        let state = cart_with(&reducer, &[("product1", "80", 1)]);

        let result = reducer.reduce(
            Some(state),
            CartAction::AddCoupon(Coupon::new("ABCD-EFGH-IJKL-MNOP", price("10"))),
        );

        assert_eq!(result.total(), price("70"));
        assert_eq!(result.item_total(), price("80"));
        assert!(!result.has_shipping_costs());
    }

    #[test]
    fn test_add_coupon_keeps_shipping_flag() {
        let (reducer, _) = reducer();
        let state = cart_with(&reducer, &[("product1", "20", 1)]);

        let result = reducer.reduce(
            Some(state.clone()),
            CartAction::AddCoupon(Coupon::new("C5", price("5"))),
        );

        assert!(result.has_shipping_costs());
        assert_eq!(result.total(), state.total() - price("5"));
    }

    #[test]
    fn test_add_duplicate_coupon_is_noop() {
        let (reducer, store) = reducer();
        let state = CartState::derive(
            Vec::new(),
            vec![Coupon::new("ABCD-EFGH-IJKL-MNOP", price("10"))],
            reducer.shipping(),
        );

        let result = reducer.reduce(
            Some(state.clone()),
            CartAction::AddCoupon(Coupon::new("ABCD-EFGH-IJKL-MNOP", price("10"))),
        );

        assert_eq!(result.coupons().len(), 1);
        assert_eq!(result, state);
        assert!(store.load(StorageKey::ShoppingCart).is_none());
    }

    #[test]
    fn test_remove_coupon() {
        let (reducer, _) = reducer();
        let state = CartState::derive(
            Vec::new(),
            vec![Coupon::new("ABCD-EFGH-IJKL-MNOP", price("10"))],
            reducer.shipping(),
        );

        let result = reducer.reduce(
            Some(state),
            CartAction::RemoveCoupon(CouponId::new("ABCD-EFGH-IJKL-MNOP")),
        );

        assert!(result.coupons().is_empty());
        assert_eq!(result.total(), Price::ZERO);
    }

    #[test]
    fn test_remove_coupon_recalculates_total_with_shipping() {
        let (reducer, _) = reducer();
        let items = vec![CartItem {
            product: product("product1", "30"),
            amount: 1,
        }];
        let state = CartState::derive(
            items,
            vec![Coupon::new("A", price("10")), Coupon::new("B", price("5"))],
            reducer.shipping(),
        );
        assert_eq!(state.total(), price("24"));

        let result = reducer.reduce(Some(state), CartAction::RemoveCoupon(CouponId::new("A")));

        assert_eq!(result.coupons().len(), 1);
        assert_eq!(result.total(), price("34"));
    }

    #[test]
    fn test_remove_unknown_coupon_is_noop() {
        let (reducer, store) = reducer();
        let state = cart_with(&reducer, &[("product1", "5", 1)]);

        let result = reducer.reduce(
            Some(state.clone()),
            CartAction::RemoveCoupon(CouponId::new("missing")),
        );

        assert_eq!(result, state);
        assert!(store.load(StorageKey::ShoppingCart).is_none());
    }

    // =========================================================================
    // PRODUCTS_LOADED
    // =========================================================================

    #[test]
    fn test_products_loaded_updates_products_in_cart() {
        let (reducer, store) = reducer();
        let stored = cart_with(&reducer, &[("product1", "12.5", 1), ("product34", "32", 4)]);
        storage::store_json(store.as_ref(), StorageKey::ShoppingCart, &stored).unwrap();

        let fresh = product("product34", "2.20").with_text(
            "de",
            ProductText {
                name: "Fixed Name".to_string(),
                ..ProductText::default()
            },
        );

        let result = reducer.reduce(None, CartAction::ProductsLoaded(vec![fresh.clone()]));

        assert_eq!(result.items().len(), 1);
        assert_eq!(result.items()[0].product, fresh);
        assert_eq!(result.items()[0].amount, 4);
        assert_eq!(result.item_total(), price("8.8"));
        assert_eq!(result.total(), price("17.8"));
    }

    #[test]
    fn test_products_loaded_ignores_in_memory_state() {
        let (reducer, store) = reducer();
        let stored = cart_with(&reducer, &[("product1", "12.5", 1)]);
        storage::store_json(store.as_ref(), StorageKey::ShoppingCart, &stored).unwrap();

        let in_memory = cart_with(&reducer, &[("product2", "99", 7)]);
        let result = reducer.reduce(
            Some(in_memory),
            CartAction::ProductsLoaded(vec![product("product1", "2.20"), product("product2", "1")]),
        );

        assert_eq!(result.items().len(), 1);
        assert_eq!(result.items()[0].product.id.as_str(), "product1");
    }

    #[test]
    fn test_products_loaded_stores_updated_cart() {
        let (reducer, store) = reducer();
        let stored = cart_with(&reducer, &[("product1", "12.5", 1)]);
        storage::store_json(store.as_ref(), StorageKey::ShoppingCart, &stored).unwrap();

        let fresh = product("product1", "2.20");
        let _ = reducer.reduce(None, CartAction::ProductsLoaded(vec![fresh.clone()]));

        let loaded: CartState =
            storage::load_json(store.as_ref(), StorageKey::ShoppingCart).unwrap();
        assert_eq!(loaded.items()[0].product, fresh);
    }

    #[test]
    fn test_products_loaded_keeps_coupons() {
        let (reducer, store) = reducer();
        let stored = CartState::derive(
            vec![CartItem {
                product: product("product1", "60"),
                amount: 1,
            }],
            vec![Coupon::new("C1", price("10"))],
            reducer.shipping(),
        );
        storage::store_json(store.as_ref(), StorageKey::ShoppingCart, &stored).unwrap();

        let result = reducer.reduce(None, CartAction::ProductsLoaded(vec![product("product1", "55")]));

        assert_eq!(result.coupons().len(), 1);
        assert_eq!(result.total(), price("45"));
    }

    #[test]
    fn test_products_loaded_with_nothing_persisted() {
        let (reducer, store) = reducer();

        let result = reducer.reduce(None, CartAction::ProductsLoaded(vec![product("p1", "1")]));

        assert!(result.is_empty());
        assert!(store.load(StorageKey::ShoppingCart).is_some());
    }

    // =========================================================================
    // Hydration and persistence
    // =========================================================================

    #[test]
    fn test_unknown_action_returns_state_without_writing() {
        let store = Arc::new(CountingStore::default());
        let reducer = CartReducer::new(store.clone());
        let state = cart_with(&reducer, &[("product1", "5", 1)]);

        let result = reducer.reduce(Some(state.clone()), CartAction::Other);

        assert_eq!(result, state);
        assert_eq!(store.writes.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn test_every_change_is_persisted() {
        let store = Arc::new(CountingStore::default());
        let reducer = CartReducer::new(store.clone());

        let state = reducer.reduce(None, CartAction::AddItem(product("p1", "10")));
        let state = reducer.reduce(Some(state), CartAction::AddItem(product("p1", "10")));

        assert_eq!(store.writes.load(std::sync::atomic::Ordering::SeqCst), 2);
        assert_eq!(reducer.hydrate(), state);
    }

    #[test]
    fn test_hydrates_from_storage_when_state_missing() {
        let (reducer, _) = reducer();
        let first = reducer.reduce(None, CartAction::AddItem(product("p1", "10")));

        let second = reducer.reduce(None, CartAction::AddItem(product("p1", "10")));

        assert_eq!(first.items()[0].amount, 1);
        assert_eq!(second.items()[0].amount, 2);
    }

    #[test]
    fn test_malformed_storage_falls_back_to_empty_cart() {
        let (reducer, store) = reducer();
        store
            .store(StorageKey::ShoppingCart, serde_json::json!({"items": "garbage"}))
            .unwrap();

        assert_eq!(reducer.hydrate(), CartState::default());

        let result = reducer.reduce(None, CartAction::AddItem(product("p1", "10")));
        assert_eq!(result.items().len(), 1);
    }

    #[test]
    fn test_failed_write_still_returns_new_state() {
        let store = Arc::new(CountingStore {
            fail: true,
            ..CountingStore::default()
        });
        let reducer = CartReducer::new(store.clone());

        let result = reducer.reduce(None, CartAction::AddItem(product("p1", "10")));

        assert_eq!(result.items().len(), 1);
        assert_eq!(store.writes.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn test_custom_shipping_policy() {
        let store = Arc::new(MemoryStore::new());
        let reducer = CartReducer::new(store)
            .with_shipping(ShippingPolicy::new(price("100"), price("4.90")));

        let result = reducer.reduce(None, CartAction::AddItem(product("p1", "60")));

        assert!(result.has_shipping_costs());
        assert_eq!(result.total(), price("64.90"));
    }

    #[test]
    fn test_hydrate_recomputes_stale_totals() {
        let (reducer, store) = reducer();
        store
            .store(
                StorageKey::ShoppingCart,
                serde_json::json!({
                    "items": [
                        { "amount": 1, "product": { "_id": "product1", "price": 12.5 } },
                        { "amount": 4, "product": { "_id": "product34", "price": 32 } }
                    ],
                    "itemTotal": 324,
                    "total": 324,
                    "hasShippingCosts": true
                }),
            )
            .unwrap();

        let cart = reducer.hydrate();

        assert_eq!(cart.item_total(), price("140.5"));
        assert_eq!(cart.total(), price("140.5"));
        assert!(!cart.has_shipping_costs());
    }

    #[test]
    fn test_hydrate_drops_empty_and_duplicate_entries() {
        let (reducer, store) = reducer();
        store
            .store(
                StorageKey::ShoppingCart,
                serde_json::json!({
                    "items": [
                        { "amount": 2, "product": { "_id": "p1", "price": 10 } },
                        { "amount": 0, "product": { "_id": "p1", "price": 10 } },
                        { "amount": 0, "product": { "_id": "p2", "price": 5 } },
                        { "amount": 3, "product": { "_id": "p1", "price": 10 } }
                    ],
                    "coupons": [
                        { "_id": "C1", "amount": 1 },
                        { "_id": "C1", "amount": 1 }
                    ],
                    "itemTotal": 0,
                    "total": 0
                }),
            )
            .unwrap();

        let cart = reducer.hydrate();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].amount, 2);
        assert_eq!(cart.coupons().len(), 1);
        assert_eq!(cart.item_total(), price("20"));
        assert_eq!(cart.total(), price("28"));
        assert!(cart.has_shipping_costs());
    }

    #[test]
    fn test_no_op_on_hydrated_cart_returns_derived_totals() {
        let (reducer, store) = reducer();
        store
            .store(
                StorageKey::ShoppingCart,
                serde_json::json!({
                    "items": [{ "amount": 2, "product": { "_id": "p1", "price": 10 } }],
                    "itemTotal": 0,
                    "total": 0
                }),
            )
            .unwrap();

        let result = reducer.reduce(None, CartAction::RemoveCoupon(CouponId::new("x")));

        assert_eq!(result.item_total(), price("20"));
        assert_eq!(result.total(), price("29"));
        assert!(result.has_shipping_costs());
    }
}
