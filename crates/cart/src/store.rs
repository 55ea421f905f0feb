//! The cart store: owns the cart and applies add/remove/update operations
//! against the stock and catalog services.

use common::ProductId;
use tokio::sync::{Mutex, RwLock};

use crate::cart::Cart;
use crate::config::{CartConfig, DEFAULT_STORAGE_KEY};
use crate::error::{CartError, Result};
use crate::notifier::{Notifier, messages};
use crate::persistence::{FilePersistence, PersistenceStore};
use crate::product::{Product, UpdateRequest};
use crate::services::{CatalogService, HttpCatalogClient, ServiceError, StockService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    AddProduct,
    RemoveProduct,
    UpdateProductAmount,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Operation::AddProduct => "add_product",
            Operation::RemoveProduct => "remove_product",
            Operation::UpdateProductAmount => "update_product_amount",
        }
    }

    /// Message reported for any rejection other than a stock shortage.
    fn failure_message(self) -> &'static str {
        match self {
            Operation::AddProduct => messages::ADD_PRODUCT_FAILED,
            Operation::RemoveProduct => messages::REMOVE_PRODUCT_FAILED,
            Operation::UpdateProductAmount => messages::UPDATE_AMOUNT_FAILED,
        }
    }
}

/// Holds the authoritative cart and mediates every change to it.
///
/// Each operation validates against fresh stock, computes the complete next
/// cart, and only then commits it to memory and to the persistence store.
/// A rejected operation leaves the cart untouched and is reported through the
/// notifier; operations never return errors to the caller.
///
/// Mutating operations are serialized: overlapping calls run one after the
/// other, each seeing the cart committed by the previous one. Share a store
/// between call sites with `Arc<CartStore<..>>`.
pub struct CartStore<S, C, P, N>
where
    S: StockService,
    C: CatalogService,
    P: PersistenceStore,
    N: Notifier,
{
    stock: S,
    catalog: C,
    persistence: P,
    notifier: N,
    storage_key: String,
    cart: RwLock<Cart>,
    operations: Mutex<()>,
}

impl<S, C, P, N> CartStore<S, C, P, N>
where
    S: StockService,
    C: CatalogService,
    P: PersistenceStore,
    N: Notifier,
{
    /// Creates a store under the default storage key, loading any cart
    /// previously persisted there.
    pub fn new(stock: S, catalog: C, persistence: P, notifier: N) -> Self {
        Self::with_storage_key(stock, catalog, persistence, notifier, DEFAULT_STORAGE_KEY)
    }

    /// Creates a store persisting under `storage_key`.
    ///
    /// A missing, unreadable or invalid blob starts the store with an empty
    /// cart.
    pub fn with_storage_key(
        stock: S,
        catalog: C,
        persistence: P,
        notifier: N,
        storage_key: impl Into<String>,
    ) -> Self {
        let storage_key = storage_key.into();
        let cart = load_cart(&persistence, &storage_key);
        tracing::debug!(key = %storage_key, products = cart.len(), "cart loaded");

        Self {
            stock,
            catalog,
            persistence,
            notifier,
            storage_key,
            cart: RwLock::new(cart),
            operations: Mutex::new(()),
        }
    }

    /// Returns a snapshot of the committed cart.
    pub async fn cart(&self) -> Cart {
        self.cart.read().await.clone()
    }

    /// Returns the key the cart is persisted under.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Adds one unit of a product, fetching its catalog entry if it is not in
    /// the cart yet.
    #[tracing::instrument(skip(self))]
    pub async fn add_product(&self, product_id: ProductId) {
        let _guard = self.operations.lock().await;
        let result = self.try_add_product(product_id).await;
        self.settle(Operation::AddProduct, result);
    }

    /// Removes a product from the cart.
    #[tracing::instrument(skip(self))]
    pub async fn remove_product(&self, product_id: ProductId) {
        let _guard = self.operations.lock().await;
        let result = self.try_remove_product(product_id).await;
        self.settle(Operation::RemoveProduct, result);
    }

    /// Sets the quantity of a product already in the cart.
    ///
    /// Zero or negative amounts are rejected; use
    /// [`remove_product`](Self::remove_product) to drop a line item.
    #[tracing::instrument(skip(self))]
    pub async fn update_product_amount(&self, request: UpdateRequest) {
        let _guard = self.operations.lock().await;
        let result = self.try_update_product_amount(request).await;
        self.settle(Operation::UpdateProductAmount, result);
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<()> {
        let cart = self.cart().await;
        let current = cart.get(product_id).map_or(0, |p| p.amount);

        let stock = self.stock.stock(product_id).await?;
        if current >= stock.amount {
            return Err(CartError::StockExceeded {
                product_id,
                requested: i64::from(current) + 1,
                available: stock.amount,
            });
        }
        let requested = current + 1;

        let updated = match cart.with_amount(product_id, requested) {
            Some(updated) => updated,
            None => {
                let entry = self.catalog.product(product_id).await?;
                if entry.id != product_id {
                    return Err(ServiceError::MalformedResponse(format!(
                        "catalog returned product {} for {product_id}",
                        entry.id
                    ))
                    .into());
                }
                cart.with_product(Product::from_catalog(entry, requested))
            }
        };

        self.commit(updated).await
    }

    async fn try_remove_product(&self, product_id: ProductId) -> Result<()> {
        let updated = self
            .cart()
            .await
            .without(product_id)
            .ok_or(CartError::ProductNotInCart(product_id))?;

        self.commit(updated).await
    }

    async fn try_update_product_amount(&self, request: UpdateRequest) -> Result<()> {
        let UpdateRequest { product_id, amount } = request;

        let stock = self.stock.stock(product_id).await?;
        if amount > i64::from(stock.amount) {
            return Err(CartError::StockExceeded {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        let cart = self.cart().await;
        if !cart.contains(product_id) {
            return Err(CartError::ProductNotInCart(product_id));
        }

        let amount = u32::try_from(amount)
            .ok()
            .filter(|&a| a > 0)
            .ok_or(CartError::InvalidAmount { product_id, amount })?;

        let updated = cart
            .with_amount(product_id, amount)
            .ok_or(CartError::ProductNotInCart(product_id))?;

        self.commit(updated).await
    }

    /// Replaces the in-memory cart and writes it through to persistence.
    ///
    /// Serialization happens first so an encoding failure commits nothing.
    /// A failed write is logged and counted; the in-memory cart stays
    /// committed.
    async fn commit(&self, cart: Cart) -> Result<()> {
        let blob = cart.to_blob()?;
        let products = cart.len();

        *self.cart.write().await = cart;

        if let Err(error) = self.persistence.write(&self.storage_key, &blob) {
            metrics::counter!("cart_persistence_failures_total").increment(1);
            tracing::warn!(%error, key = %self.storage_key, "failed to persist cart");
        }

        tracing::debug!(products, "cart committed");
        Ok(())
    }

    fn settle(&self, operation: Operation, result: Result<()>) {
        match result {
            Ok(()) => {
                metrics::counter!(
                    "cart_operations_total",
                    "operation" => operation.as_str(),
                    "outcome" => "committed"
                )
                .increment(1);
            }
            Err(error) => {
                metrics::counter!(
                    "cart_operations_total",
                    "operation" => operation.as_str(),
                    "outcome" => "rejected"
                )
                .increment(1);
                tracing::warn!(operation = operation.as_str(), %error, "cart operation rejected");

                let message = match error {
                    CartError::StockExceeded { .. } => messages::STOCK_EXCEEDED,
                    _ => operation.failure_message(),
                };
                self.notifier.report_error(message);
            }
        }
    }
}

fn load_cart<P: PersistenceStore>(persistence: &P, key: &str) -> Cart {
    match persistence.read(key) {
        Ok(Some(blob)) => Cart::from_blob(&blob).unwrap_or_else(|error| {
            tracing::warn!(%error, key, "discarding invalid persisted cart");
            Cart::new()
        }),
        Ok(None) => Cart::new(),
        Err(error) => {
            tracing::warn!(%error, key, "failed to read persisted cart");
            Cart::new()
        }
    }
}

/// A store backed by the product API and file persistence.
pub type HttpCartStore<N> = CartStore<HttpCatalogClient, HttpCatalogClient, FilePersistence, N>;

impl<N: Notifier> HttpCartStore<N> {
    /// Wires a store to the product API and storage directory named in
    /// `config`.
    pub fn from_config(config: &CartConfig, notifier: N) -> std::result::Result<Self, ServiceError> {
        let client = HttpCatalogClient::from_config(config)?;
        Ok(Self::with_storage_key(
            client.clone(),
            client,
            FilePersistence::from_config(config),
            notifier,
            config.storage_key.clone(),
        ))
    }
}
