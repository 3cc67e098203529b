//! Webshop Core - Shared types and shopping cart logic.
//!
//! This crate provides the domain model used across the webshop components:
//! - `storefront` - Static file and JSON API server
//! - `integration-tests` - Cross-crate behaviour tests
//!
//! # Architecture
//!
//! The core crate contains types, the cart reducer, and the storage trait it
//! persists through. It performs no network or filesystem I/O of its own;
//! durable storage is injected through [`storage::DurableStore`].
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs and prices, products and coupons
//! - [`cart`] - Cart state, actions, the reducer and the dispatching store
//! - [`storage`] - Durable key-value store abstraction

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod storage;
pub mod types;

pub use cart::{CartAction, CartItem, CartReducer, CartState, CartStore, ShippingPolicy};
pub use storage::{DurableStore, MemoryStore, StorageError, StorageKey};
pub use types::*;
