//! Product and coupon catalog.
//!
//! The catalog is the storefront's source of product data. It is read once at
//! startup from a JSON file of the form:
//!
//! ```json
//! {
//!   "products": [{ "_id": "p1", "price": 12.5, "locales": { "de": { "name": "Tee" } } }],
//!   "coupons": [{ "_id": "WELCOME10", "amount": 10 }]
//! }
//! ```

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use webshop_core::{Coupon, CouponId, Product, ProductId};

/// Errors raised while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("duplicate product id in catalog: {0}")]
    DuplicateProduct(ProductId),
    #[error("duplicate coupon id in catalog: {0}")]
    DuplicateCoupon(CouponId),
}

/// Products and coupons available in the shop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    coupons: Vec<Coupon>,
}

impl Catalog {
    /// Build a catalog from products and coupons.
    ///
    /// # Errors
    ///
    /// Returns an error if a product or coupon id appears twice.
    pub fn new(products: Vec<Product>, coupons: Vec<Coupon>) -> Result<Self, CatalogError> {
        let catalog = Self { products, coupons };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load the catalog file at `path`.
    ///
    /// A missing file yields an empty catalog so that a fresh checkout can
    /// start the server without any data.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// contains duplicate ids.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Catalog file not found, starting with an empty catalog");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(CatalogError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let catalog: Self = serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        catalog.validate()?;

        tracing::info!(
            products = catalog.products.len(),
            coupons = catalog.coupons.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Look up a coupon by id.
    #[must_use]
    pub fn coupon(&self, id: &CouponId) -> Option<&Coupon> {
        self.coupons.iter().find(|coupon| &coupon.id == id)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut product_ids = HashSet::new();
        for product in &self.products {
            if !product_ids.insert(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }

        let mut coupon_ids = HashSet::new();
        for coupon in &self.coupons {
            if !coupon_ids.insert(&coupon.id) {
                return Err(CatalogError::DuplicateCoupon(coupon.id.clone()));
            }
        }

        Ok(())
    }
}
