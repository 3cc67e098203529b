//! Product entity as supplied by the catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// Locale-specific display text for a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductText {
    pub name: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
}

/// A product that can be put into a cart.
///
/// Only `id` and `price` matter to cart arithmetic; the remaining fields are
/// carried along so that a cart item always holds the full product as last
/// seen by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub price: Price,
    /// Display text keyed by locale (e.g. `"de"`, `"en"`).
    #[serde(default)]
    pub locales: BTreeMap<String, ProductText>,
    #[serde(default)]
    pub stock: i32,
    /// Picture file references, first one is the tile image.
    #[serde(default)]
    pub files: Vec<String>,
}

impl Product {
    /// Create a product with only an id and price.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, price: Price) -> Self {
        Self {
            id: id.into(),
            price,
            locales: BTreeMap::new(),
            stock: 0,
            files: Vec::new(),
        }
    }

    /// Add display text for a locale.
    #[must_use]
    pub fn with_text(mut self, locale: impl Into<String>, text: ProductText) -> Self {
        self.locales.insert(locale.into(), text);
        self
    }

    /// Display name for `locale`, if the product has text for it.
    #[must_use]
    pub fn name(&self, locale: &str) -> Option<&str> {
        self.locales.get(locale).map(|text| text.name.as_str())
    }

    /// Returns `true` if at least one unit is in stock.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
