//! Durable key-value storage used to persist cart state.
//!
//! The cart reducer never touches the filesystem itself. It is handed a
//! [`DurableStore`] and reads or writes a single slot identified by a
//! [`StorageKey`]. Values are JSON documents so that any backend (memory,
//! files, browser storage behind an adapter) can hold them.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Errors that can occur when writing to a durable store.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Value could not be converted to or from JSON.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// A previous writer panicked while holding the store lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Fixed identifiers of the slots kept in durable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The persisted shopping cart.
    ShoppingCart,
}

impl StorageKey {
    /// Stable string form of the key, used for file names and map keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShoppingCart => "SHOPPING_CART",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A durable key-value store.
///
/// `load` never fails: a missing or unreadable value is simply absent.
/// `store` reports failures, but callers on the cart path treat writes as
/// fire-and-forget and only log them.
pub trait DurableStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn load(&self, key: StorageKey) -> Option<Value>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend could not persist the value.
    fn store(&self, key: StorageKey, value: Value) -> Result<(), StorageError>;
}

impl<T: DurableStore + ?Sized> DurableStore for Arc<T> {
    fn load(&self, key: StorageKey) -> Option<Value> {
        (**self).load(key)
    }

    fn store(&self, key: StorageKey, value: Value) -> Result<(), StorageError> {
        (**self).store(key, value)
    }
}

/// Load and deserialize the value under `key`.
///
/// Missing values and values that do not match `T` both yield `None`; the
/// latter is logged because it means persisted data was corrupted or written
/// by an incompatible version.
pub fn load_json<T: DeserializeOwned>(store: &dyn DurableStore, key: StorageKey) -> Option<T> {
    let value = store.load(key)?;
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Ignoring malformed persisted value");
            None
        }
    }
}

/// Serialize `value` and store it under `key`.
///
/// # Errors
///
/// Returns [`StorageError`] if serialization or the backend write fails.
pub fn store_json<T: Serialize>(
    store: &dyn DurableStore,
    key: StorageKey,
    value: &T,
) -> Result<(), StorageError> {
    let value = serde_json::to_value(value)?;
    store.store(key, value)
}

/// In-process store, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<StorageKey, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableStore for MemoryStore {
    fn load(&self, key: StorageKey) -> Option<Value> {
        self.slots.read().ok()?.get(&key).cloned()
    }

    fn store(&self, key: StorageKey, value: Value) -> Result<(), StorageError> {
        self.slots
            .write()
            .map_err(|_| StorageError::Poisoned)?
            .insert(key, value);
        Ok(())
    }
}
