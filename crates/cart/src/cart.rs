//! The cart value: an ordered, id-unique list of line items.

use std::collections::HashSet;

use common::ProductId;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::product::Product;

/// Reasons a persisted cart blob is rejected on load.
#[derive(Debug, Error)]
pub enum CartFormatError {
    /// The blob is not a JSON array of products.
    #[error("Malformed cart data: {0}")]
    Json(#[from] serde_json::Error),

    /// The same product appears twice.
    #[error("Duplicate product in cart: {0}")]
    DuplicateProduct(ProductId),

    /// A line item holds no units.
    #[error("Product {0} has a zero amount")]
    ZeroAmount(ProductId),
}

/// Snapshot of the cart contents.
///
/// Mutating helpers return a new snapshot and leave `self` untouched, so the
/// store can compute the full next state before committing anything.
/// Deserializing goes through the same checks as [`Cart::from_blob`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Product>")]
pub struct Cart {
    products: Vec<Product>,
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.products.serialize(serializer)
    }
}

impl TryFrom<Vec<Product>> for Cart {
    type Error = CartFormatError;

    fn try_from(products: Vec<Product>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if product.amount == 0 {
                return Err(CartFormatError::ZeroAmount(product.id));
            }
            if !seen.insert(product.id) {
                return Err(CartFormatError::DuplicateProduct(product.id));
            }
        }

        Ok(Self { products })
    }
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a persisted cart blob.
    pub fn from_blob(blob: &str) -> Result<Self, CartFormatError> {
        let products: Vec<Product> = serde_json::from_str(blob)?;
        Self::try_from(products)
    }

    /// Serializes the cart into its persisted form.
    pub fn to_blob(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Total number of units across all line items.
    pub fn total_items(&self) -> u64 {
        self.products.iter().map(|p| u64::from(p.amount)).sum()
    }

    /// Returns a copy with the given product's amount replaced, keeping its
    /// position. `None` if the product is not in the cart.
    pub(crate) fn with_amount(&self, product_id: ProductId, amount: u32) -> Option<Self> {
        debug_assert!(amount > 0, "cart amounts must be positive");
        let index = self.products.iter().position(|p| p.id == product_id)?;
        let mut products = self.products.clone();
        products[index].amount = amount;
        Some(Self { products })
    }

    /// Returns a copy with the product appended. The product must not
    /// already be in the cart.
    pub(crate) fn with_product(&self, product: Product) -> Self {
        debug_assert!(!self.contains(product.id), "duplicate product in cart");
        let mut products = self.products.clone();
        products.push(product);
        Self { products }
    }

    /// Returns a copy without the given product. `None` if it is not in the
    /// cart.
    pub(crate) fn without(&self, product_id: ProductId) -> Option<Self> {
        if !self.contains(product_id) {
            return None;
        }
        let products = self
            .products
            .iter()
            .filter(|p| p.id != product_id)
            .cloned()
            .collect();
        Some(Self { products })
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
