//! Client-side shopping cart.
//!
//! This crate keeps the cart a shopper is filling in: an ordered list of
//! products with quantities, persisted across restarts and checked against
//! live stock on every change.
//!
//! - [`CartStore`] owns the cart and applies add/remove/update operations
//! - [`StockService`] and [`CatalogService`] answer stock and product queries
//! - [`PersistenceStore`] keeps the serialized cart between runs
//! - [`Notifier`] receives the user-facing message of a rejected operation

pub mod cart;
pub mod config;
pub mod error;
pub mod notifier;
pub mod persistence;
pub mod product;
pub mod services;
pub mod store;
pub mod telemetry;

pub use cart::{Cart, CartFormatError};
pub use common::ProductId;
pub use config::{CartConfig, DEFAULT_STORAGE_KEY};
pub use error::CartError;
pub use notifier::{Notifier, RecordingNotifier, TracingNotifier, messages};
pub use persistence::{FilePersistence, InMemoryPersistence, PersistenceError, PersistenceStore};
pub use product::{Attributes, CatalogEntry, Product, StockRecord, UpdateRequest};
pub use services::{
    CatalogService, HttpCatalogClient, InMemoryCatalogService, InMemoryStockService, ServiceError,
    StockService,
};
pub use store::{CartStore, HttpCartStore};
pub use telemetry::init_tracing;
