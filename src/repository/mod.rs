//! Repository layer for collection storage

pub mod collections;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, Collection, CollectionDetails, NewCollection},
};

pub use collections::CollectionsRepository;
pub use memory::MemoryRepository;

/// Storage operations for collections.
///
/// Implementations enforce `(name, user_id)` uniqueness themselves and
/// return `AppError::Conflict` on a duplicate; lookups by id return
/// `AppError::NotFound` when the collection is absent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionsStore: Send + Sync {
    /// All collections, oldest first
    async fn list(&self) -> AppResult<Vec<Collection>>;

    async fn create(&self, data: &NewCollection) -> AppResult<Collection>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Collection>;

    /// Collection with the owner's display name resolved
    async fn get_with_owner(&self, id: Uuid) -> AppResult<CollectionDetails>;

    /// Returns whether a collection was removed
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Append books at the end of the list in one update
    async fn append_books(&self, id: Uuid, books: &[Book]) -> AppResult<Collection>;

    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the collections store
#[derive(Clone)]
pub struct Repository {
    pub collections: Arc<dyn CollectionsStore>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self::with_store(Arc::new(CollectionsRepository::new(pool)))
    }

    pub fn with_store(collections: Arc<dyn CollectionsStore>) -> Self {
        Self { collections }
    }
}
