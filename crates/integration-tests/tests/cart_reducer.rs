//! Integration tests for the cart reducer backed by files on disk.
//!
//! These tests exercise the full core path: reducer, store and the
//! file-backed durable store used by the storefront.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use tempfile::TempDir;
use webshop_core::{
    CartAction, CartReducer, CartState, CartStore, CouponId, Price, ProductId, StorageKey,
};
use webshop_integration_tests::{coupon, product};
use webshop_storefront::storage::FileStore;

fn reducer_in(dir: &TempDir) -> CartReducer {
    CartReducer::new(Arc::new(FileStore::new(dir.path())))
}

fn price(cents: i64) -> Price {
    Price::from_cents(cents)
}

fn cart_file(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join(format!("{}.json", StorageKey::ShoppingCart))
}

// =============================================================================
// Totals
// =============================================================================

#[test]
fn test_small_cart_pays_shipping() {
    let dir = TempDir::new().unwrap();
    let mut store = CartStore::new(reducer_in(&dir));

    store.dispatch(CartAction::AddItem(product("p1", 4900)));
    let cart = store.dispatch(CartAction::AddItem(product("p2", 95)));

    assert_eq!(cart.item_total(), price(4995));
    assert_eq!(cart.total(), price(5895));
    assert!(cart.has_shipping_costs());
}

#[test]
fn test_coupon_reduces_total_above_threshold() {
    let dir = TempDir::new().unwrap();
    let mut store = CartStore::new(reducer_in(&dir));

    store.dispatch(CartAction::AddItem(product("p1", 4000)));
    store.dispatch(CartAction::AddItem(product("p1", 4000)));
    let cart = store.dispatch(CartAction::AddCoupon(coupon("C1", 1000)));

    assert_eq!(cart.item_total(), price(8000));
    assert_eq!(cart.total(), price(7000));
    assert!(!cart.has_shipping_costs());
}

#[test]
fn test_removing_last_item_clears_shipping() {
    let dir = TempDir::new().unwrap();
    let mut store = CartStore::new(reducer_in(&dir));

    let p1 = product("p1", 1000);
    store.dispatch(CartAction::AddItem(p1.clone()));
    let cart = store.dispatch(CartAction::SetAmount {
        product: p1,
        amount: 0,
    });

    assert!(cart.is_empty());
    assert_eq!(cart.total(), Price::ZERO);
    assert!(!cart.has_shipping_costs());
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_cart_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let mut store = CartStore::new(reducer_in(&dir));
        store.dispatch(CartAction::AddItem(product("p1", 1250)));
        store.dispatch(CartAction::AddItem(product("p1", 1250)));
        store.dispatch(CartAction::AddCoupon(coupon("C1", 200)));
    }

    let store = CartStore::new(reducer_in(&dir));
    let cart = store.state();

    assert_eq!(cart.item(&ProductId::new("p1")).unwrap().amount, 2);
    assert!(cart.has_coupon(&CouponId::new("C1")));
    assert_eq!(cart.item_total(), price(2500));
    assert_eq!(cart.total(), price(3200));
}

#[test]
fn test_no_op_action_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let mut store = CartStore::new(reducer_in(&dir));

    store.dispatch(CartAction::AddItem(product("p1", 1000)));
    assert!(cart_file(&dir).exists());
    std::fs::remove_file(cart_file(&dir)).unwrap();

    store.dispatch(CartAction::RemoveCoupon(CouponId::new("missing")));
    store.dispatch(CartAction::Other);

    assert!(!cart_file(&dir).exists());
}

#[test]
fn test_corrupt_file_hydrates_empty_cart() {
    let dir = TempDir::new().unwrap();
    std::fs::write(cart_file(&dir), b"{ not json").unwrap();

    let store = CartStore::new(reducer_in(&dir));

    assert_eq!(store.state(), &CartState::default());
}

// =============================================================================
// Catalog reconciliation
// =============================================================================

#[test]
fn test_products_loaded_reconciles_persisted_cart() {
    let dir = TempDir::new().unwrap();

    {
        let mut store = CartStore::new(reducer_in(&dir));
        store.dispatch(CartAction::AddItem(product("p1", 1250)));
        let p34 = product("p34", 3200);
        store.dispatch(CartAction::AddItem(p34.clone()));
        store.dispatch(CartAction::SetAmount {
            product: p34,
            amount: 4,
        });
    }

    let reducer = reducer_in(&dir);
    let cart = reducer.reduce(
        Some(CartState::default()),
        CartAction::ProductsLoaded(vec![product("p34", 220)]),
    );

    assert_eq!(cart.items().len(), 1);
    let item = cart.item(&ProductId::new("p34")).unwrap();
    assert_eq!(item.amount, 4);
    assert_eq!(item.product.price, price(220));
    assert_eq!(cart.item_total(), price(880));
    assert_eq!(cart.total(), price(1780));

    // The reconciled cart is what a later session sees.
    assert_eq!(reducer_in(&dir).hydrate(), cart);
}
