//! Shopping cart domain.
//!
//! - [`state`] - Cart contents and derived totals
//! - [`action`] - Actions the cart understands
//! - [`reducer`] - Pure transition function with persistence
//! - [`store`] - Dispatching container holding the live cart

pub mod action;
pub mod reducer;
pub mod state;
pub mod store;

pub use action::CartAction;
pub use reducer::CartReducer;
pub use state::{CartItem, CartState, ShippingPolicy};
pub use store::CartStore;
