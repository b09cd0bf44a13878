//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the layout store as a trait object so the backend is chosen once
//! at startup and handlers never name a concrete store type.

use std::sync::Arc;

use crate::services::store::{LayoutStore, MemoryStore};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the store is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LayoutStore>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn LayoutStore>) -> Self {
        Self { store }
    }

    /// State backed by a fresh, empty [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
