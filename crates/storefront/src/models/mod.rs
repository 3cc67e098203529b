//! Storefront-specific models.

pub mod cart_id;

pub use cart_id::{CartId, CartIdError};
