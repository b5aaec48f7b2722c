use std::collections::HashSet;
use tokio::sync::RwLock;

use super::{LocalStore, StoreError};
use crate::model::StoredMovie;

#[derive(Default)]
struct MemoryState {
    rows: Vec<StoredMovie>,
    ids: HashSet<i64>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl LocalStore for MemoryStore {
    async fn get_all(&self) -> Result<Vec<StoredMovie>, StoreError> {
        Ok(self.state.read().await.rows.clone())
    }

    async fn insert(&self, movie: StoredMovie) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if !state.ids.insert(movie.id) {
            return Err(StoreError::Duplicate(movie.id));
        }
        state.rows.push(movie);
        Ok(())
    }
}
