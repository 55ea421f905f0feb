//! Cart operation errors.

use common::ProductId;
use thiserror::Error;

use crate::services::ServiceError;

/// Reasons a cart operation is rejected.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested quantity is more than the stock service has.
    #[error(
        "Requested quantity exceeds stock for product {product_id}: requested {requested}, available {available}"
    )]
    StockExceeded {
        product_id: ProductId,
        requested: i64,
        available: u32,
    },

    /// The product is not in the cart.
    #[error("Product not in cart: {0}")]
    ProductNotInCart(ProductId),

    /// The requested quantity is zero or negative.
    #[error("Invalid amount for product {product_id}: {amount} (must be greater than 0)")]
    InvalidAmount { product_id: ProductId, amount: i64 },

    /// A stock or catalog query failed.
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// The cart could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for cart results.
pub type Result<T> = std::result::Result<T, CartError>;
