//! Discount coupons.

use serde::{Deserialize, Serialize};

use super::{CouponId, Price};

/// A coupon reducing the cart total by a fixed amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    #[serde(rename = "_id")]
    pub id: CouponId,
    pub amount: Price,
}

impl Coupon {
    /// Create a new coupon.
    #[must_use]
    pub fn new(id: impl Into<CouponId>, amount: Price) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }
}
