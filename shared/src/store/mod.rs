mod memory;
#[cfg(not(target_arch = "wasm32"))]
mod sqlite;

pub use memory::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub use sqlite::SqliteStore;

use thiserror::Error;

use crate::model::StoredMovie;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("movie {0} is already stored")]
    Duplicate(i64),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("schema version {found} is newer than supported {max}")]
    FutureSchema { found: u32, max: u32 },

    #[error("lock acquisition failed")]
    LockFailed,
}

/// Local persistence for movies. Implementations must tolerate concurrent
/// `insert` calls.
#[async_trait::async_trait]
pub trait LocalStore: Send + Sync {
    /// All stored movies in insertion order.
    async fn get_all(&self) -> Result<Vec<StoredMovie>, StoreError>;
    async fn insert(&self, movie: StoredMovie) -> Result<(), StoreError>;
}
