//! Book catalog endpoints

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult, ErrorEnvelope},
    models::Book,
    AppState,
};

use super::Envelope;

/// Query parameters for searching the catalog
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookSearchQuery {
    /// Free-text query (title, author, ISBN...)
    pub q: Option<String>,
    /// Page size, 1 to 40
    pub max_results: Option<u32>,
}

/// Search the external book catalog
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(BookSearchQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>),
        (status = 400, description = "Missing query", body = ErrorEnvelope),
        (status = 502, description = "Catalog unavailable", body = ErrorEnvelope)
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    query: Result<Query<BookSearchQuery>, QueryRejection>,
) -> AppResult<Json<Envelope<Vec<Book>>>> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let books = state
        .services
        .catalog
        .search(query.q.as_deref().unwrap_or_default(), query.max_results)
        .await?;
    Ok(Envelope::success(books))
}

/// Get a single book from the external catalog
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Catalog volume ID")),
    responses(
        (status = 200, description = "Book", body = Book),
        (status = 404, description = "Unknown volume", body = ErrorEnvelope),
        (status = 502, description = "Catalog unavailable", body = ErrorEnvelope)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<Book>>> {
    let book = state.services.catalog.get_volume(&id).await?;
    Ok(Envelope::success(book))
}
