//! Collections service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{AddBooks, Collection, CollectionDetails, CreateCollection, NewCollection},
    repository::Repository,
};

#[derive(Clone)]
pub struct CollectionsService {
    repository: Repository,
}

impl CollectionsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all collections
    pub async fn list(&self) -> AppResult<Vec<Collection>> {
        self.repository.collections.list().await
    }

    /// Create a collection. Duplicates are rejected by the store.
    pub async fn create(&self, data: CreateCollection) -> AppResult<Collection> {
        data.validate()?;

        let collection = self
            .repository
            .collections
            .create(&NewCollection::from(data))
            .await?;

        tracing::info!(
            "Created collection {} '{}' for user {}",
            collection.id,
            collection.name,
            collection.user_id
        );
        Ok(collection)
    }

    /// Get a collection with its owner's display name
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<CollectionDetails> {
        self.repository.collections.get_with_owner(id).await
    }

    /// Delete a collection; deleting an unknown id is not an error
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let removed = self.repository.collections.delete(id).await?;
        if removed {
            tracing::info!("Deleted collection {}", id);
        } else {
            tracing::debug!("Delete of unknown collection {} ignored", id);
        }
        Ok(())
    }

    /// Append books to a collection.
    ///
    /// The collection must exist before the body is even decoded, so an
    /// unknown id always yields `NotFound` whatever the payload.
    pub async fn add_books(&self, id: Uuid, body: &[u8]) -> AppResult<Collection> {
        self.repository.collections.get_by_id(id).await?;

        let payload: AddBooks = serde_json::from_slice(body).map_err(AppError::invalid_body)?;
        payload.validate()?;

        let collection = self
            .repository
            .collections
            .append_books(id, &payload.books)
            .await?;

        tracing::info!(
            "Added {} book(s) to collection {} (now {})",
            payload.books.len(),
            id,
            collection.books.len()
        );
        Ok(collection)
    }

    /// Check that the store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.collections.ping().await
    }
}
