//! Collections API endpoints

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, ErrorEnvelope},
    models::{AddBooks, Collection, CollectionDetails, CreateCollection},
    AppState,
};

use super::{ApiJson, Envelope};

fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::BadRequest(format!("Invalid collection id '{}'", raw)))
}

/// List all collections
#[utoipa::path(
    get,
    path = "/collections",
    tag = "collections",
    responses(
        (status = 200, description = "All collections, in the success envelope", body = Vec<Collection>),
        (status = 500, description = "Storage failure", body = ErrorEnvelope)
    )
)]
pub async fn list_collections(
    State(state): State<AppState>,
) -> AppResult<Json<Envelope<Vec<Collection>>>> {
    let collections = state.services.collections.list().await?;
    Ok(Envelope::success(collections))
}

/// Create a collection
#[utoipa::path(
    post,
    path = "/collections",
    tag = "collections",
    request_body = CreateCollection,
    responses(
        (status = 201, description = "Collection created", body = Collection),
        (status = 400, description = "Invalid body", body = ErrorEnvelope),
        (status = 409, description = "A collection with this name already exists for the user", body = ErrorEnvelope)
    )
)]
pub async fn create_collection(
    State(state): State<AppState>,
    ApiJson(data): ApiJson<CreateCollection>,
) -> AppResult<(StatusCode, Json<Envelope<Collection>>)> {
    let collection = state.services.collections.create(data).await?;
    Ok((StatusCode::CREATED, Envelope::success(collection)))
}

/// Get a collection with its owner's display name
#[utoipa::path(
    get,
    path = "/collections/{id}",
    tag = "collections",
    params(("id" = Uuid, Path, description = "Collection ID")),
    responses(
        (status = 200, description = "Collection details", body = CollectionDetails),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 404, description = "Collection not found", body = ErrorEnvelope)
    )
)]
pub async fn get_collection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<CollectionDetails>>> {
    let id = parse_id(&id)?;
    let details = state.services.collections.get_by_id(id).await?;
    Ok(Envelope::success(details))
}

/// Delete a collection (succeeds whether or not it existed)
#[utoipa::path(
    delete,
    path = "/collections/{id}",
    tag = "collections",
    params(("id" = Uuid, Path, description = "Collection ID")),
    responses(
        (status = 204, description = "Collection deleted or absent"),
        (status = 400, description = "Malformed id", body = ErrorEnvelope)
    )
)]
pub async fn delete_collection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id)?;
    state.services.collections.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Append books to a collection
#[utoipa::path(
    post,
    path = "/collections/{id}/books",
    tag = "collections",
    params(("id" = Uuid, Path, description = "Collection ID")),
    request_body = AddBooks,
    responses(
        (status = 200, description = "Updated collection", body = Collection),
        (status = 400, description = "Malformed id or invalid book list", body = ErrorEnvelope),
        (status = 404, description = "Collection not found", body = ErrorEnvelope)
    )
)]
pub async fn add_books(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> AppResult<Json<Envelope<Collection>>> {
    let id = parse_id(&id)?;
    let collection = state.services.collections.add_books(id, &body).await?;
    Ok(Envelope::success(collection))
}
