//! Application-wide cart container.
//!
//! `CartStore` owns the current [`CartState`], feeds every dispatched
//! [`CartAction`] through the [`CartReducer`], and tells subscribers when the
//! cart actually changed. Persistence happens inside the reducer.

use super::action::CartAction;
use super::reducer::CartReducer;
use super::state::CartState;

type Listener = Box<dyn FnMut(&CartState) + Send>;

/// Holds the live cart and dispatches actions against it.
pub struct CartStore {
    reducer: CartReducer,
    state: CartState,
    listeners: Vec<Listener>,
}

impl CartStore {
    /// Create a store, hydrating the initial cart from durable storage.
    #[must_use]
    pub fn new(reducer: CartReducer) -> Self {
        let state = reducer.hydrate();
        tracing::debug!(items = state.items().len(), "Cart hydrated");

        Self {
            reducer,
            state,
            listeners: Vec::new(),
        }
    }

    /// The current cart.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// The reducer this store dispatches through.
    #[must_use]
    pub const fn reducer(&self) -> &CartReducer {
        &self.reducer
    }

    /// Apply `action` and return the resulting cart.
    ///
    /// Subscribers are only notified if the cart changed.
    pub fn dispatch(&mut self, action: CartAction) -> &CartState {
        let next = self.reducer.reduce(Some(self.state.clone()), action);

        if next != self.state {
            self.state = next;
            for listener in &mut self.listeners {
                listener(&self.state);
            }
        }

        &self.state
    }

    /// Register a callback invoked with the new cart after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartState) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("reducer", &self.reducer)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
