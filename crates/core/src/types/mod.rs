//! Core types for the webshop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod coupon;
pub mod id;
pub mod price;
pub mod product;

pub use coupon::Coupon;
pub use id::*;
pub use price::Price;
pub use product::{Product, ProductText};
