//! Collection model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::book::Book;

/// Collection record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: Uuid,
    pub name: String,
    /// Owning user reference (not checked against the users table)
    pub user_id: String,
    pub books: Vec<Book>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Owner as exposed alongside a collection: display name only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OwnerSummary {
    pub id: String,
    pub username: String,
}

/// Collection with its owner resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CollectionDetails {
    #[serde(flatten)]
    pub collection: Collection,
    /// `null` when the owner no longer exists
    pub user: Option<OwnerSummary>,
}

/// Create collection request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollection {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(min = 1, message = "User id cannot be empty"))]
    pub user_id: String,
    /// Initial books, empty when omitted
    #[serde(default)]
    #[validate(nested)]
    pub books: Vec<Book>,
}

/// Validated collection ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewCollection {
    pub name: String,
    pub user_id: String,
    pub books: Vec<Book>,
}

impl From<CreateCollection> for NewCollection {
    fn from(data: CreateCollection) -> Self {
        Self {
            name: data.name.trim().to_string(),
            user_id: data.user_id,
            books: data.books,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Collection name cannot be empty".into());
        return Err(error);
    }
    Ok(())
}
