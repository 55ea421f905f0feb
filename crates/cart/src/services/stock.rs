//! Stock service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::ProductId;
use tokio::sync::RwLock;

use super::ServiceError;
use crate::product::StockRecord;

/// Answers how many units of a product are available.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Returns the current stock for a product.
    async fn stock(&self, product_id: ProductId) -> Result<StockRecord, ServiceError>;
}

#[derive(Debug, Default)]
struct InMemoryStockState {
    levels: HashMap<ProductId, u32>,
    fail_on_query: bool,
    queries: usize,
}

/// In-memory stock service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStockService {
    state: Arc<RwLock<InMemoryStockState>>,
}

impl InMemoryStockService {
    /// Creates a stock service with no products.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the available amount for a product.
    pub async fn set_stock(&self, product_id: impl Into<ProductId>, amount: u32) {
        self.state
            .write()
            .await
            .levels
            .insert(product_id.into(), amount);
    }

    /// Configures the service to fail every query.
    pub async fn set_fail_on_query(&self, fail: bool) {
        self.state.write().await.fail_on_query = fail;
    }

    /// Returns how many queries have been answered or failed.
    pub async fn query_count(&self) -> usize {
        self.state.read().await.queries
    }
}

#[async_trait]
impl StockService for InMemoryStockService {
    async fn stock(&self, product_id: ProductId) -> Result<StockRecord, ServiceError> {
        let mut state = self.state.write().await;
        state.queries += 1;

        if state.fail_on_query {
            return Err(ServiceError::Unavailable(
                "stock service unreachable".to_string(),
            ));
        }

        state
            .levels
            .get(&product_id)
            .map(|&amount| StockRecord::new(product_id, amount))
            .ok_or(ServiceError::NotFound(product_id))
    }
}
