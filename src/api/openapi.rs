//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, collections, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "1.0.0",
        description = "Book collections REST API. Every JSON response is wrapped in \
                       `{ status: \"success\", data }` or `{ status: \"error\", error }`.",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Collections
        collections::list_collections,
        collections::create_collection,
        collections::get_collection,
        collections::delete_collection,
        collections::add_books,
        // Catalog
        books::search_books,
        books::get_book,
    ),
    components(
        schemas(
            crate::models::Book,
            crate::models::AddBooks,
            crate::models::Collection,
            crate::models::CollectionDetails,
            crate::models::CreateCollection,
            crate::models::OwnerSummary,
            books::BookSearchQuery,
            health::HealthResponse,
            // Errors
            crate::error::ErrorEnvelope,
            crate::error::ErrorResponse,
            crate::error::FieldError,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "collections", description = "User book collections"),
        (name = "books", description = "External book catalog")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
