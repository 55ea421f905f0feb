//! HTTP client for the product API.
//!
//! The API exposes two read endpoints:
//! - `GET {base}/stock/{id}` → `{"id": 1, "amount": 3}`
//! - `GET {base}/products/{id}` → `{"id": 1, "title": "...", ...}`

use std::time::Duration;

use async_trait::async_trait;
use common::ProductId;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::{CatalogService, ServiceError, StockService};
use crate::config::CartConfig;
use crate::product::{CatalogEntry, StockRecord};

/// Stock and catalog client backed by the product API.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
}

impl HttpCatalogClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// Every request is bounded by `timeout`; an expired request surfaces as
    /// [`ServiceError::Http`].
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(2)))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Creates a client from the cart configuration.
    pub fn from_config(config: &CartConfig) -> Result<Self, ServiceError> {
        Self::new(config.api_base_url.clone(), config.api_timeout)
    }

    /// Returns the API root, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, resource: &str, product_id: ProductId) -> String {
        format!("{}/{}/{}", self.base_url, resource, product_id)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        product_id: ProductId,
    ) -> Result<T, ServiceError> {
        let url = self.url(resource, product_id);
        tracing::debug!(%url, "querying product API");

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ServiceError::NotFound(product_id));
        }

        response
            .error_for_status()?
            .json::<T>()
            .await
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl StockService for HttpCatalogClient {
    async fn stock(&self, product_id: ProductId) -> Result<StockRecord, ServiceError> {
        let record: StockRecord = self.get_json("stock", product_id).await?;
        if record.id != product_id {
            return Err(ServiceError::MalformedResponse(format!(
                "stock record for {} returned for product {product_id}",
                record.id
            )));
        }
        Ok(record)
    }
}

#[async_trait]
impl CatalogService for HttpCatalogClient {
    async fn product(&self, product_id: ProductId) -> Result<CatalogEntry, ServiceError> {
        self.get_json("products", product_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    async fn stock_handler(Path(id): Path<i64>) -> Response {
        match id {
            1 => Json(json!({"id": 1, "amount": 5})).into_response(),
            2 => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            3 => (StatusCode::OK, "not json").into_response(),
            4 => Json(json!({"id": 40, "amount": 5})).into_response(),
            _ => StatusCode::NOT_FOUND.into_response(),
        }
    }

    async fn product_handler(Path(id): Path<i64>) -> Response {
        match id {
            1 => Json(json!({
                "id": 1,
                "title": "Running shoe",
                "price": 179.9,
                "image": "https://cdn.example.com/shoe.jpg"
            }))
            .into_response(),
            _ => StatusCode::NOT_FOUND.into_response(),
        }
    }

    async fn spawn_api() -> String {
        let app = Router::new()
            .route("/stock/{id}", get(stock_handler))
            .route("/products/{id}", get(product_handler));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}/")
    }

    async fn client() -> HttpCatalogClient {
        HttpCatalogClient::new(spawn_api().await, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpCatalogClient::new("http://localhost:3333/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3333");
        assert_eq!(
            client.url("stock", ProductId::new(7)),
            "http://localhost:3333/stock/7"
        );
    }

    #[tokio::test]
    async fn test_fetch_stock() {
        let client = client().await;
        let record = client.stock(ProductId::new(1)).await.unwrap();
        assert_eq!(record, StockRecord::new(1, 5));
    }

    #[tokio::test]
    async fn test_fetch_product() {
        let client = client().await;
        let entry = client.product(ProductId::new(1)).await.unwrap();
        assert_eq!(entry.id, ProductId::new(1));
        assert_eq!(entry.attributes["title"], json!("Running shoe"));
    }

    #[tokio::test]
    async fn test_not_found() {
        let client = client().await;
        assert!(matches!(
            client.stock(ProductId::new(99)).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            client.product(ProductId::new(99)).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_server_error() {
        let client = client().await;
        assert!(matches!(
            client.stock(ProductId::new(2)).await,
            Err(ServiceError::Http(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let client = client().await;
        assert!(matches!(
            client.stock(ProductId::new(3)).await,
            Err(ServiceError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_mismatched_stock_id() {
        let client = client().await;
        assert!(matches!(
            client.stock(ProductId::new(4)).await,
            Err(ServiceError::MalformedResponse(_))
        ));
    }
}
