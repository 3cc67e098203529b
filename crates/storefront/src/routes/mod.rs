//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                                  - Liveness check
//! GET    /health/ready                            - Readiness check
//!
//! # Products
//! GET    /api/products                            - Product listing
//! GET    /api/products/{product_id}               - Product detail
//!
//! # Cart
//! POST   /api/carts                               - Create cart (returns new id)
//! GET    /api/carts/{cart_id}                     - Cart state
//! POST   /api/carts/{cart_id}/items               - Add one unit of a product
//! PUT    /api/carts/{cart_id}/items/{product_id}  - Set product amount
//! DELETE /api/carts/{cart_id}/items/{product_id}  - Remove product
//! POST   /api/carts/{cart_id}/coupons             - Apply coupon
//! DELETE /api/carts/{cart_id}/coupons/{coupon_id} - Remove coupon
//! POST   /api/carts/{cart_id}/refresh             - Reconcile with catalog
//!
//! # Static
//! GET    /*                                       - Client application (dist/)
//! ```

pub mod cart;
pub mod health;
pub mod products;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{product_id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(cart::create))
        .route("/{cart_id}", get(cart::show))
        .route("/{cart_id}/items", post(cart::add_item))
        .route(
            "/{cart_id}/items/{product_id}",
            put(cart::set_amount).delete(cart::remove_item),
        )
        .route("/{cart_id}/coupons", post(cart::add_coupon))
        .route(
            "/{cart_id}/coupons/{coupon_id}",
            axum::routing::delete(cart::remove_coupon),
        )
        .route("/{cart_id}/refresh", post(cart::refresh))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/products", product_routes())
        .nest("/api/carts", cart_routes())
}
