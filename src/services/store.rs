//! Layout store — holds the single current floor plan.
//!
//! DESIGN
//! ======
//! Route handlers only see the `LayoutStore` capability (`save` / `load`), so
//! a durable backend can replace `MemoryStore` without touching request
//! handling. `MemoryStore` keeps the document behind a `RwLock`: a save swaps
//! the whole value under the write guard, so a concurrent load observes
//! either the previous layout or the new one, never a mix. There is no
//! ordering between overlapping saves; the last one to take the lock wins.

use async_trait::async_trait;
use layout::Layout;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("layout store unavailable: {0}")]
    Unavailable(String),
}

/// Monotonic save counter. Zero means nothing has been saved yet.
pub type Revision = u64;

/// Replace-and-read access to the current layout.
#[async_trait]
pub trait LayoutStore: Send + Sync {
    /// Overwrite the held layout. Returns the revision the save produced.
    async fn save(&self, layout: Layout) -> Result<Revision, StoreError>;

    /// Return the held layout, or an empty one if nothing has been saved.
    async fn load(&self) -> Result<Layout, StoreError>;

    /// Current revision and element count.
    async fn stats(&self) -> Result<StoreStats, StoreError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StoreStats {
    pub revision: Revision,
    pub elements: usize,
}

struct Held {
    layout: Layout,
    revision: Revision,
}

/// Process-memory backend. Starts empty and resets on restart.
pub struct MemoryStore {
    held: RwLock<Held>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self { held: RwLock::new(Held { layout: Layout::new(), revision: 0 }) }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LayoutStore for MemoryStore {
    async fn save(&self, layout: Layout) -> Result<Revision, StoreError> {
        let mut held = self.held.write().await;
        held.layout = layout;
        held.revision += 1;
        debug!(revision = held.revision, elements = held.layout.len(), "layout replaced");
        Ok(held.revision)
    }

    async fn load(&self) -> Result<Layout, StoreError> {
        Ok(self.held.read().await.layout.clone())
    }

    async fn stats(&self) -> Result<StoreStats, StoreError> {
        let held = self.held.read().await;
        Ok(StoreStats { revision: held.revision, elements: held.layout.len() })
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
