//! Integration tests for the webshop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p webshop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_reducer` - Reducer behavior against the file-backed store
//! - `storefront_api` - Cart API driven through the router
//!
//! Every test works in its own temporary data directory, so tests can run in
//! parallel and leave nothing behind.

use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

use tempfile::TempDir;
use webshop_core::{Coupon, Price, Product, ProductText, ShippingPolicy};
use webshop_storefront::catalog::Catalog;
use webshop_storefront::config::StorefrontConfig;
use webshop_storefront::state::AppState;

/// A product priced in cents with an English name.
#[must_use]
pub fn product(id: &str, cents: i64) -> Product {
    Product::new(id, Price::from_cents(cents)).with_text(
        "en",
        ProductText {
            name: format!("Product {id}"),
            ..ProductText::default()
        },
    )
}

/// A coupon worth `cents`.
#[must_use]
pub fn coupon(id: &str, cents: i64) -> Coupon {
    Coupon::new(id, Price::from_cents(cents))
}

/// Catalog used by the API tests.
///
/// `mug` is cheap enough to trigger shipping, `lamp` is not.
///
/// # Panics
///
/// Panics if the fixture contains duplicate ids.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn sample_catalog() -> Catalog {
    Catalog::new(
        vec![product("mug", 1250), product("lamp", 6000)],
        vec![coupon("WELCOME5", 500)],
    )
    .unwrap()
}

/// Storefront configuration rooted at `data_dir`.
#[must_use]
pub fn test_config(data_dir: &Path) -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        data_dir: data_dir.to_path_buf(),
        static_dir: data_dir.join("dist"),
        catalog_path: data_dir.join("catalog.json"),
        shipping: ShippingPolicy::default(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// A temporary data directory plus application state pointing at it.
pub struct TestContext {
    pub dir: TempDir,
    pub state: AppState,
}

impl TestContext {
    /// Create a fresh context with [`sample_catalog`].
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let state = AppState::new(test_config(dir.path()), sample_catalog());
        Self { dir, state }
    }

    /// A second application state over the same data directory, as after a
    /// server restart.
    #[must_use]
    pub fn restarted(&self) -> AppState {
        AppState::new(test_config(self.dir.path()), sample_catalog())
    }

    /// Router for this context.
    #[must_use]
    pub fn app(&self) -> axum::Router {
        webshop_storefront::app(self.state.clone())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
