//! Catalog service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::ProductId;
use tokio::sync::RwLock;

use super::ServiceError;
use crate::product::CatalogEntry;

/// Looks up product metadata.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Returns the catalog entry for a product.
    async fn product(&self, product_id: ProductId) -> Result<CatalogEntry, ServiceError>;
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    entries: HashMap<ProductId, CatalogEntry>,
    fail_on_query: bool,
    queries: usize,
}

/// In-memory catalog for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogService {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalogService {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a catalog entry.
    pub async fn insert(&self, entry: CatalogEntry) {
        self.state.write().await.entries.insert(entry.id, entry);
    }

    /// Configures the catalog to fail every query.
    pub async fn set_fail_on_query(&self, fail: bool) {
        self.state.write().await.fail_on_query = fail;
    }

    /// Returns how many lookups have been made.
    pub async fn query_count(&self) -> usize {
        self.state.read().await.queries
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalogService {
    async fn product(&self, product_id: ProductId) -> Result<CatalogEntry, ServiceError> {
        let mut state = self.state.write().await;
        state.queries += 1;

        if state.fail_on_query {
            return Err(ServiceError::Unavailable(
                "catalog service unreachable".to_string(),
            ));
        }

        state
            .entries
            .get(&product_id)
            .cloned()
            .ok_or(ServiceError::NotFound(product_id))
    }
}
