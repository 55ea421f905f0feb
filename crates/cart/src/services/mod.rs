//! Remote product services the cart queries, with in-memory and HTTP
//! implementations.

pub mod catalog;
pub mod http;
pub mod stock;

pub use catalog::{CatalogService, InMemoryCatalogService};
pub use http::HttpCatalogClient;
pub use stock::{InMemoryStockService, StockService};

use common::ProductId;
use thiserror::Error;

/// Errors raised by the stock and catalog services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service has no record of the product.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The service could not answer.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with something that is not a valid record.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
