//! Book model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A book entry as stored inside a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Catalog volume identifier
    #[validate(length(min = 1, message = "Book id cannot be empty"))]
    pub id: String,
    #[validate(length(min = 1, message = "Book title cannot be empty"))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Cover image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Thumbnail must be a URL"))]
    pub thumbnail: Option<String>,
    /// Catalog page for the book
    #[validate(url(message = "Info link must be a URL"))]
    pub info_link: String,
}

/// Add books to a collection request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddBooks {
    /// Books appended in the given order
    #[validate(length(min = 1, message = "At least one book is required"), nested)]
    pub books: Vec<Book>,
}
