//! Business logic services

pub mod catalog;
pub mod collections;

use crate::{config::CatalogConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub collections: collections::CollectionsService,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, catalog_config: CatalogConfig) -> AppResult<Self> {
        Ok(Self {
            collections: collections::CollectionsService::new(repository),
            catalog: catalog::CatalogService::new(catalog_config)?,
        })
    }
}
