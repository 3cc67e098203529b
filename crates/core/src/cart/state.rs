//! Cart state and the totals derived from it.

use serde::{Deserialize, Serialize};

use crate::types::{Coupon, CouponId, Price, Product, ProductId};

/// Shipping surcharge rules.
///
/// Orders with a positive item total below `threshold` pay `cost` on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    /// Item total from which shipping is free.
    pub threshold: Price,
    /// Flat surcharge below the threshold.
    pub cost: Price,
}

impl ShippingPolicy {
    /// Item total from which shipping is free by default.
    pub const DEFAULT_THRESHOLD_UNITS: i64 = 50;
    /// Default flat shipping surcharge.
    pub const DEFAULT_COST_UNITS: i64 = 9;

    /// Create a policy with a custom threshold and cost.
    #[must_use]
    pub const fn new(threshold: Price, cost: Price) -> Self {
        Self { threshold, cost }
    }

    /// Whether an order with this item total pays shipping.
    #[must_use]
    pub fn applies_to(&self, item_total: Price) -> bool {
        item_total.is_positive() && item_total < self.threshold
    }

    /// Shipping charged for an order with this item total.
    #[must_use]
    pub fn cost_for(&self, item_total: Price) -> Price {
        if self.applies_to(item_total) {
            self.cost
        } else {
            Price::ZERO
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            threshold: Price::from_units(Self::DEFAULT_THRESHOLD_UNITS),
            cost: Price::from_units(Self::DEFAULT_COST_UNITS),
        }
    }
}

/// One product line in the cart. `amount` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub amount: u32,
}

impl CartItem {
    /// Price of this line: unit price times amount.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.amount)
    }
}

/// Shopping cart contents and totals.
///
/// `item_total`, `total` and `has_shipping_costs` are derived from the items,
/// coupons and shipping policy every time the cart changes. They are stored
/// (and serialized) so that consumers can read them without recomputing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartState {
    items: Vec<CartItem>,
    coupons: Vec<Coupon>,
    item_total: Price,
    total: Price,
    has_shipping_costs: bool,
}

impl CartState {
    /// Build a cart from items and coupons, deriving all totals.
    #[must_use]
    pub fn derive(items: Vec<CartItem>, coupons: Vec<Coupon>, shipping: &ShippingPolicy) -> Self {
        let item_total: Price = items.iter().map(CartItem::line_total).sum::<Price>().rounded();
        let coupon_total: Price = coupons.iter().map(|coupon| coupon.amount).sum();
        let has_shipping_costs = !items.is_empty() && shipping.applies_to(item_total);
        let shipping_cost = if has_shipping_costs {
            shipping.cost
        } else {
            Price::ZERO
        };

        Self {
            items,
            coupons,
            item_total,
            total: (item_total - coupon_total + shipping_cost).rounded(),
            has_shipping_costs,
        }
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Applied coupons in insertion order.
    #[must_use]
    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Sum of all line totals.
    #[must_use]
    pub const fn item_total(&self) -> Price {
        self.item_total
    }

    /// Amount due: item total minus coupons plus shipping.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// Whether the shipping surcharge is included in `total`.
    #[must_use]
    pub const fn has_shipping_costs(&self) -> bool {
        self.has_shipping_costs
    }

    /// Shipping surcharge included in `total` under `shipping`.
    #[must_use]
    pub const fn shipping_cost(&self, shipping: &ShippingPolicy) -> Price {
        if self.has_shipping_costs {
            shipping.cost
        } else {
            Price::ZERO
        }
    }

    /// Sum of all applied coupon amounts.
    #[must_use]
    pub fn coupon_total(&self) -> Price {
        self.coupons.iter().map(|coupon| coupon.amount).sum()
    }

    /// Total number of units across all items (badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |count, item| count.saturating_add(item.amount))
    }

    /// Returns `true` if the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item for `product_id`, if present.
    #[must_use]
    pub fn item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product.id == product_id)
    }

    /// Returns `true` if a coupon with `coupon_id` is applied.
    #[must_use]
    pub fn has_coupon(&self, coupon_id: &CouponId) -> bool {
        self.coupons.iter().any(|coupon| &coupon.id == coupon_id)
    }

    pub(crate) fn into_parts(self) -> (Vec<CartItem>, Vec<Coupon>) {
        (self.items, self.coupons)
    }
}
