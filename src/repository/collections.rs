//! Collections repository (PostgreSQL)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Book, Collection, CollectionDetails, NewCollection, OwnerSummary},
};

use super::CollectionsStore;

#[derive(FromRow)]
struct CollectionRow {
    id: Uuid,
    name: String,
    user_id: String,
    books: Json<Vec<Book>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct CollectionWithOwnerRow {
    #[sqlx(flatten)]
    collection: CollectionRow,
    username: Option<String>,
}

impl From<CollectionRow> for Collection {
    fn from(row: CollectionRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            user_id: row.user_id,
            books: row.books.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<CollectionWithOwnerRow> for CollectionDetails {
    fn from(row: CollectionWithOwnerRow) -> Self {
        let user = row.username.map(|username| OwnerSummary {
            id: row.collection.user_id.clone(),
            username,
        });
        Self {
            collection: row.collection.into(),
            user,
        }
    }
}

#[derive(Clone)]
pub struct CollectionsRepository {
    pool: Pool<Postgres>,
}

impl CollectionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionsStore for CollectionsRepository {
    async fn list(&self) -> AppResult<Vec<Collection>> {
        let rows = sqlx::query_as::<_, CollectionRow>(
            "SELECT * FROM collections ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Collection::from).collect())
    }

    async fn create(&self, data: &NewCollection) -> AppResult<Collection> {
        let result = sqlx::query_as::<_, CollectionRow>(
            r#"
            INSERT INTO collections (id, name, user_id, books)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.user_id)
        .bind(Json(&data.books))
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Conflict(
                format!("Collection '{}' already exists", data.name),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Collection> {
        sqlx::query_as::<_, CollectionRow>("SELECT * FROM collections WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Collection::from)
            .ok_or_else(|| AppError::NotFound(format!("Collection {} not found", id)))
    }

    async fn get_with_owner(&self, id: Uuid) -> AppResult<CollectionDetails> {
        sqlx::query_as::<_, CollectionWithOwnerRow>(
            r#"
            SELECT c.*, u.username
            FROM collections c
            LEFT JOIN users u ON u.id = c.user_id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(CollectionDetails::from)
        .ok_or_else(|| AppError::NotFound(format!("Collection {} not found", id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM collections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn append_books(&self, id: Uuid, books: &[Book]) -> AppResult<Collection> {
        sqlx::query_as::<_, CollectionRow>(
            r#"
            UPDATE collections
            SET books = books || $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Json(books))
        .fetch_optional(&self.pool)
        .await?
        .map(Collection::from)
        .ok_or_else(|| AppError::NotFound(format!("Collection {} not found", id)))
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
