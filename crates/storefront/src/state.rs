//! Application state shared across handlers.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use webshop_core::{CartReducer, CartStore};

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::models::CartId;
use crate::storage::FileStore;

/// Carts idle longer than this are dropped from memory and re-read from disk
/// on next use.
const CART_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Maximum number of carts kept in memory.
const MAX_CACHED_CARTS: u64 = 10_000;

/// A cart store shared between requests for the same cart.
pub type SharedCart = Arc<Mutex<CartStore>>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration, the catalog and live carts.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    carts: Cache<CartId, SharedCart>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Products and coupons offered by the shop
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let carts = Cache::builder()
            .max_capacity(MAX_CACHED_CARTS)
            .time_to_idle(CART_IDLE_TIMEOUT)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                carts,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the live store for an existing cart, hydrating it from disk on
    /// first use.
    ///
    /// Returns `Ok(None)` if no cart with this id was ever created. Looking up
    /// an unknown id neither writes to disk nor occupies the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if hydrating the cart panicked.
    pub async fn cart(&self, cart_id: &CartId) -> Result<Option<SharedCart>> {
        if let Some(cart) = self.inner.carts.get(cart_id).await {
            return Ok(Some(cart));
        }

        let dir = self.cart_dir(cart_id);
        let exists = tokio::fs::metadata(&dir)
            .await
            .is_ok_and(|meta| meta.is_dir());
        if !exists {
            return Ok(None);
        }

        self.open(cart_id, dir).await.map(Some)
    }

    /// Create the cart `cart_id` on disk and return its live store.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart directory cannot be created.
    pub async fn create_cart(&self, cart_id: &CartId) -> Result<SharedCart> {
        let dir = self.cart_dir(cart_id);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(webshop_core::StorageError::from)?;
        self.open(cart_id, dir).await
    }

    fn cart_dir(&self, cart_id: &CartId) -> PathBuf {
        self.config().carts_dir().join(cart_id.as_str())
    }

    async fn open(&self, cart_id: &CartId, dir: PathBuf) -> Result<SharedCart> {
        let shipping = self.config().shipping;

        let cart = self
            .inner
            .carts
            .try_get_with_by_ref(cart_id, async move {
                tokio::task::spawn_blocking(move || {
                    let reducer =
                        CartReducer::new(Arc::new(FileStore::new(dir))).with_shipping(shipping);
                    tracing::debug!("Opened cart store");
                    Arc::new(Mutex::new(CartStore::new(reducer)))
                })
                .await
            })
            .await?;
        Ok(cart)
    }
}
