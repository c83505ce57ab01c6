//! In-process collections store
//!
//! Keeps the same guarantees as the PostgreSQL store: `(name, user_id)` is
//! unique and appends are applied under a single write lock.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Book, Collection, CollectionDetails, NewCollection, OwnerSummary},
};

use super::CollectionsStore;

#[derive(Default)]
struct MemoryState {
    collections: Vec<Collection>,
    /// user id -> username
    users: HashMap<String, String>,
}

#[derive(Clone, Default)]
pub struct MemoryRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an owner so that its display name can be resolved
    pub async fn add_user(&self, id: impl Into<String>, username: impl Into<String>) {
        self.state
            .write()
            .await
            .users
            .insert(id.into(), username.into());
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Collection {} not found", id))
}

#[async_trait]
impl CollectionsStore for MemoryRepository {
    async fn list(&self) -> AppResult<Vec<Collection>> {
        Ok(self.state.read().await.collections.clone())
    }

    async fn create(&self, data: &NewCollection) -> AppResult<Collection> {
        let mut state = self.state.write().await;
        if state
            .collections
            .iter()
            .any(|c| c.name == data.name && c.user_id == data.user_id)
        {
            return Err(AppError::Conflict(format!(
                "Collection '{}' already exists",
                data.name
            )));
        }

        let now = Utc::now();
        let collection = Collection {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            user_id: data.user_id.clone(),
            books: data.books.clone(),
            created_at: now,
            updated_at: now,
        };
        state.collections.push(collection.clone());
        Ok(collection)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Collection> {
        self.state
            .read()
            .await
            .collections
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn get_with_owner(&self, id: Uuid) -> AppResult<CollectionDetails> {
        let state = self.state.read().await;
        let collection = state
            .collections
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))?;
        let user = state
            .users
            .get(&collection.user_id)
            .map(|username| OwnerSummary {
                id: collection.user_id.clone(),
                username: username.clone(),
            });
        Ok(CollectionDetails { collection, user })
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let before = state.collections.len();
        state.collections.retain(|c| c.id != id);
        Ok(state.collections.len() < before)
    }

    async fn append_books(&self, id: Uuid, books: &[Book]) -> AppResult<Collection> {
        let mut state = self.state.write().await;
        let collection = state
            .collections
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found(id))?;
        collection.books.extend_from_slice(books);
        collection.updated_at = Utc::now();
        Ok(collection.clone())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_collection(name: &str, user_id: &str) -> NewCollection {
        NewCollection {
            name: name.to_string(),
            user_id: user_id.to_string(),
            books: vec![],
        }
    }

    fn book(id: &str) -> Book {
        Book {
            id: id.to_string(),
            title: format!("Title {}", id),
            authors: None,
            description: None,
            thumbnail: None,
            info_link: format!("https://example.com/{}", id),
        }
    }

    #[tokio::test]
    async fn test_same_name_allowed_for_different_owners() {
        let store = MemoryRepository::new();
        store.create(&new_collection("Favorites", "u1")).await.unwrap();
        store.create(&new_collection("Favorites", "u2")).await.unwrap();

        let err = store
            .create(&new_collection("Favorites", "u1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_append_keeps_order_and_duplicates() {
        let store = MemoryRepository::new();
        let created = store.create(&new_collection("Queue", "u1")).await.unwrap();

        store.append_books(created.id, &[book("a"), book("b")]).await.unwrap();
        let updated = store.append_books(created.id, &[book("a")]).await.unwrap();

        let ids: Vec<&str> = updated.books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "a"]);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let store = MemoryRepository::new();
        let created = store.create(&new_collection("Old", "u1")).await.unwrap();

        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
        assert!(matches!(
            store.get_by_id(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_owner_resolution() {
        let store = MemoryRepository::new();
        store.add_user("u1", "alice").await;
        let owned = store.create(&new_collection("Mine", "u1")).await.unwrap();
        let orphan = store.create(&new_collection("Orphan", "ghost")).await.unwrap();

        let details = store.get_with_owner(owned.id).await.unwrap();
        assert_eq!(details.user.unwrap().username, "alice");

        let details = store.get_with_owner(orphan.id).await.unwrap();
        assert!(details.user.is_none());
    }
}
