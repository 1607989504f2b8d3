use async_trait::async_trait;
use thiserror::Error;

use crate::services::dogs::{Dog, DogPatch, NewDog};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Dog not found: {id}")]
    NotFound { id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// System of record for dogs.
///
/// Each method is a single call into the backing database; atomicity and
/// concurrent writes to the same id are left to the database.
#[async_trait]
pub trait DogStore: Send + Sync {
    /// All dogs, ordered by id.
    async fn list(&self) -> StoreResult<Vec<Dog>>;

    async fn find(&self, id: i64) -> StoreResult<Option<Dog>>;

    /// Insert and return the record with its assigned id.
    async fn create(&self, dog: NewDog) -> StoreResult<Dog>;

    /// Apply the present fields of `patch`. `NotFound` when no row has `id`.
    async fn update(&self, id: i64, patch: DogPatch) -> StoreResult<Dog>;

    /// Delete and return the removed row. `NotFound` when no row has `id`.
    async fn delete(&self, id: i64) -> StoreResult<Dog>;
}
