//! Cart line items and the catalog/stock records they are built from.

use common::ProductId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Catalog fields the cart carries along without interpreting them
/// (title, price, image, ...).
pub type Attributes = serde_json::Map<String, Value>;

/// Product metadata as returned by the catalog, without a cart quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ProductId,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl CatalogEntry {
    /// Creates an entry with no attributes.
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            attributes: Attributes::new(),
        }
    }

    /// Adds a catalog attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// A cart line item: a catalog product plus the quantity held in the cart.
///
/// Serializes as a flat object, e.g. `{"id":1,"title":"Sneaker","amount":2}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(flatten)]
    pub attributes: Attributes,
    pub amount: u32,
}

impl Product {
    /// Builds a line item from a catalog entry.
    ///
    /// An `amount` field sent by the catalog is dropped so the cart quantity
    /// is the only one serialized.
    pub fn from_catalog(entry: CatalogEntry, amount: u32) -> Self {
        let mut attributes = entry.attributes;
        attributes.remove("amount");
        Self {
            id: entry.id,
            attributes,
            amount,
        }
    }

    /// Returns a catalog attribute by name.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Returns the display title, if the catalog provided one.
    pub fn title(&self) -> Option<&str> {
        self.attribute("title").and_then(Value::as_str)
    }
}

/// Available stock for a product, fetched fresh for every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: ProductId,
    pub amount: u32,
}

impl StockRecord {
    pub fn new(id: impl Into<ProductId>, amount: u32) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }
}

/// Request to set the quantity of a product already in the cart.
///
/// The amount is signed: callers may send zero or negative values, which the
/// store rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateRequest {
    pub product_id: ProductId,
    pub amount: i64,
}

impl UpdateRequest {
    pub fn new(product_id: impl Into<ProductId>, amount: i64) -> Self {
        Self {
            product_id: product_id.into(),
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_serializes_flat_with_amount() {
        let entry = CatalogEntry::new(1)
            .with_attribute("title", "Sneaker")
            .with_attribute("price", 179.9);
        let product = Product::from_catalog(entry, 2);

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(
            value,
            json!({"id": 1, "title": "Sneaker", "price": 179.9, "amount": 2})
        );
    }

    #[test]
    fn product_keeps_unknown_catalog_fields() {
        let raw = json!({"id": 3, "image": "https://cdn/x.jpg", "tags": ["a"], "amount": 1});
        let product: Product = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.amount, 1);
        assert_eq!(product.attribute("tags"), Some(&json!(["a"])));
        assert_eq!(serde_json::to_value(&product).unwrap(), raw);
    }

    #[test]
    fn from_catalog_drops_catalog_amount() {
        let entry = CatalogEntry::new(5).with_attribute("amount", 99);
        let product = Product::from_catalog(entry, 1);

        assert_eq!(product.amount, 1);
        assert!(product.attribute("amount").is_none());
    }

    #[test]
    fn title_reads_string_attribute() {
        let product = Product::from_catalog(CatalogEntry::new(1).with_attribute("title", "Boot"), 1);
        assert_eq!(product.title(), Some("Boot"));

        let untitled = Product::from_catalog(CatalogEntry::new(2), 1);
        assert_eq!(untitled.title(), None);
    }

    #[test]
    fn stock_record_ignores_extra_fields() {
        let record: StockRecord =
            serde_json::from_value(json!({"id": 1, "amount": 3, "warehouse": "A"})).unwrap();
        assert_eq!(record, StockRecord::new(1, 3));
    }

    #[test]
    fn stock_record_rejects_negative_amount() {
        assert!(serde_json::from_value::<StockRecord>(json!({"id": 1, "amount": -1})).is_err());
    }
}
