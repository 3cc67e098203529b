//! Actions accepted by the cart reducer.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Coupon, CouponId, Product};

const ADD_ITEM: &str = "ADD_ITEM_TO_SHOPPING_CART";
const SET_AMOUNT: &str = "SET_SHOPPING_CART_AMOUNT";
const ADD_COUPON: &str = "ADD_COUPON_TO_SHOPPING_CART";
const REMOVE_COUPON: &str = "REMOVE_COUPON_FROM_SHOPPING_CART";
const PRODUCTS_LOADED: &str = "PRODUCTS_LOADED";
const OTHER: &str = "OTHER";

/// A requested change to the cart.
///
/// Serialized as `{"type": "...", "data": ...}` using the action names the
/// storefront client dispatches. `PRODUCTS_LOADED` also accepts its products
/// under `products`. Any other `type` deserializes to [`CartAction::Other`]
/// whatever its payload, and leaves the cart untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum CartAction {
    /// Put one more unit of a product into the cart.
    #[serde(rename = "ADD_ITEM_TO_SHOPPING_CART")]
    AddItem(Product),

    /// Set the absolute amount of a product; zero or less removes it.
    #[serde(rename = "SET_SHOPPING_CART_AMOUNT")]
    SetAmount { product: Product, amount: i64 },

    /// Apply a coupon unless one with the same id is already applied.
    #[serde(rename = "ADD_COUPON_TO_SHOPPING_CART")]
    AddCoupon(Coupon),

    /// Remove the coupon with this id.
    #[serde(rename = "REMOVE_COUPON_FROM_SHOPPING_CART")]
    RemoveCoupon(CouponId),

    /// Fresh catalog data arrived; reconcile the persisted cart against it.
    #[serde(rename = "PRODUCTS_LOADED")]
    ProductsLoaded(Vec<Product>),

    /// Any action this reducer does not handle.
    #[serde(rename = "OTHER")]
    Other,
}

impl CartAction {
    /// Wire name of the action, for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddItem(_) => ADD_ITEM,
            Self::SetAmount { .. } => SET_AMOUNT,
            Self::AddCoupon(_) => ADD_COUPON,
            Self::RemoveCoupon(_) => REMOVE_COUPON,
            Self::ProductsLoaded(_) => PRODUCTS_LOADED,
            Self::Other => OTHER,
        }
    }
}

/// Action envelope before the payload is interpreted.
#[derive(Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    products: Option<Value>,
}

#[derive(Deserialize)]
struct SetAmountData {
    product: Product,
    amount: i64,
}

fn payload<T: DeserializeOwned, E: de::Error>(kind: &str, value: Value) -> Result<T, E> {
    serde_json::from_value(value).map_err(|e| E::custom(format_args!("invalid {kind} payload: {e}")))
}

impl<'de> Deserialize<'de> for CartAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawAction {
            kind,
            data,
            products,
        } = RawAction::deserialize(deserializer)?;

        let action = match kind.as_str() {
            ADD_ITEM => Self::AddItem(payload(&kind, data)?),
            SET_AMOUNT => {
                let SetAmountData { product, amount } = payload(&kind, data)?;
                Self::SetAmount { product, amount }
            }
            ADD_COUPON => Self::AddCoupon(payload(&kind, data)?),
            REMOVE_COUPON => Self::RemoveCoupon(payload(&kind, data)?),
            PRODUCTS_LOADED => Self::ProductsLoaded(payload(&kind, products.unwrap_or(data))?),
            _ => Self::Other,
        };
        Ok(action)
    }
}
