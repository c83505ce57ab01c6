//! Book catalog client (Google Books volumes API)

use std::time::Duration;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{Book, GoogleBook, VolumeList},
};

/// Largest page the provider accepts
const PROVIDER_MAX_RESULTS: u32 = 40;

#[derive(Clone)]
pub struct CatalogService {
    client: reqwest::Client,
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(config: CatalogConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("bookshelf-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build catalog client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Search volumes and project each hit to a `Book`
    pub async fn search(&self, query: &str, max_results: Option<u32>) -> AppResult<Vec<Book>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Validation("Search query cannot be empty".to_string()));
        }
        let max_results = clamp_max_results(max_results.unwrap_or(self.config.max_results));

        tracing::debug!("Catalog search '{}' (max {})", query, max_results);

        let mut params = vec![
            ("q", query.to_string()),
            ("maxResults", max_results.to_string()),
        ];
        if let Some(key) = &self.config.api_key {
            params.push(("key", key.clone()));
        }

        let url = format!("{}/volumes", self.base_url());
        let resp = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Catalog unavailable: {}", e)))?;

        if !resp.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Catalog returned {}",
                resp.status()
            )));
        }

        let list = resp
            .json::<VolumeList>()
            .await
            .map_err(|e| AppError::Upstream(format!("Invalid catalog response: {}", e)))?;

        let books: Vec<Book> = list
            .items
            .unwrap_or_default()
            .iter()
            .map(Book::from)
            .collect();

        tracing::info!(
            "Catalog search '{}' returned {} of {} volume(s)",
            query,
            books.len(),
            list.total_items
        );
        Ok(books)
    }

    /// Fetch a single volume by its provider id
    pub async fn get_volume(&self, volume_id: &str) -> AppResult<Book> {
        if !is_valid_volume_id(volume_id) {
            return Err(AppError::BadRequest(format!(
                "Invalid volume id '{}'",
                volume_id
            )));
        }

        let url = format!("{}/volumes/{}", self.base_url(), volume_id);
        let mut request = self.client.get(&url);
        if let Some(key) = &self.config.api_key {
            request = request.query(&[("key", key)]);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Catalog unavailable: {}", e)))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("Volume {} not found", volume_id)));
        }

        if !resp.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Catalog returned {}",
                resp.status()
            )));
        }

        let volume = resp
            .json::<GoogleBook>()
            .await
            .map_err(|e| AppError::Upstream(format!("Invalid catalog response: {}", e)))?;

        Ok(Book::from(&volume))
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }
}

fn clamp_max_results(requested: u32) -> u32 {
    requested.clamp(1, PROVIDER_MAX_RESULTS)
}

fn is_valid_volume_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn volume(id: &str, title: &str) -> Value {
        json!({
            "kind": "books#volume",
            "id": id,
            "etag": "etag",
            "selfLink": format!("https://www.googleapis.com/books/v1/volumes/{}", id),
            "volumeInfo": {
                "title": title,
                "authors": ["Someone"],
                "imageLinks": { "thumbnail": format!("https://books.google.com/{}.jpg", id) },
                "infoLink": format!("https://books.google.com/books?id={}", id)
            }
        })
    }

    /// Serve a fake provider on an ephemeral port and return its base URL
    async fn fake_provider() -> String {
        let app = Router::new()
            .route(
                "/volumes",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    if params.get("q").map(String::as_str) == Some("nothing") {
                        return Json(json!({ "kind": "books#volumes", "totalItems": 0 }));
                    }
                    let max: usize = params["maxResults"].parse().unwrap();
                    let items: Vec<Value> = (0..max.min(3))
                        .map(|i| volume(&format!("v{}", i), &params["q"]))
                        .collect();
                    Json(json!({ "kind": "books#volumes", "totalItems": 120, "items": items }))
                }),
            )
            .route(
                "/volumes/:id",
                get(|Path(id): Path<String>| async move {
                    if id == "missing" {
                        Err(StatusCode::NOT_FOUND)
                    } else if id == "broken" {
                        Err(StatusCode::SERVICE_UNAVAILABLE)
                    } else {
                        Ok(Json(volume(&id, "Single")))
                    }
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    fn service(base_url: String) -> CatalogService {
        CatalogService::new(CatalogConfig {
            base_url,
            ..CatalogConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_clamp_max_results() {
        assert_eq!(clamp_max_results(0), 1);
        assert_eq!(clamp_max_results(20), 20);
        assert_eq!(clamp_max_results(500), 40);
    }

    #[test]
    fn test_volume_id_charset() {
        assert!(is_valid_volume_id("zyTCAlFPjgYC"));
        assert!(is_valid_volume_id("a-b_c"));
        assert!(!is_valid_volume_id(""));
        assert!(!is_valid_volume_id("../admin"));
        assert!(!is_valid_volume_id("a b"));
    }

    #[tokio::test]
    async fn test_search_projects_volumes() {
        let catalog = service(fake_provider().await);
        let books = catalog.search("dune", Some(2)).await.unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].id, "v0");
        assert_eq!(books[0].title, "dune");
        assert_eq!(books[1].thumbnail.as_deref(), Some("https://books.google.com/v1.jpg"));
    }

    #[tokio::test]
    async fn test_search_without_hits_is_empty() {
        let catalog = service(fake_provider().await);
        assert!(catalog.search("nothing", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let catalog = service("http://127.0.0.1:9".to_string());
        let err = catalog.search("   ", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_volume_status_mapping() {
        let catalog = service(fake_provider().await);

        let book = catalog.get_volume("abc").await.unwrap();
        assert_eq!(book.title, "Single");

        let err = catalog.get_volume("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = catalog.get_volume("broken").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
