//! Application state for the engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::store::MemoryStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// currently the record store.
#[derive(Clone)]
pub struct AppState {
    /// The record store backing all computations.
    store: Arc<MemoryStore>,
}

impl AppState {
    /// Creates a new application state around the given store.
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the record store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
