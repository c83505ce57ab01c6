//! API handlers for Bookshelf REST endpoints

pub mod books;
pub mod collections;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    routing::{get, post},
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{error::AppError, AppState};

/// Success envelope: `{ "status": "success", "data": ... }`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            status: "success",
            data,
        })
    }
}

/// `Json<T>` whose rejection is reported through the error envelope
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<serde_json::Value>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::Validation(rejection.body_text()))?;
        serde_json::from_value(value)
            .map(Self)
            .map_err(AppError::invalid_body)
    }
}

/// Routes served under `/api/v1`
pub fn routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Collections
        .route(
            "/collections",
            get(collections::list_collections).post(collections::create_collection),
        )
        .route(
            "/collections/:id",
            get(collections::get_collection).delete(collections::delete_collection),
        )
        .route("/collections/:id/books", post(collections::add_books))
        // Catalog
        .route("/books/search", get(books::search_books))
        .route("/books/:id", get(books::get_book))
        .with_state(state)
}

/// Full application router: API, OpenAPI documentation, fallback
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes(state))
        .merge(openapi::create_openapi_router())
        .fallback(|| async { AppError::NotFound("No such route".to_string()) })
}
