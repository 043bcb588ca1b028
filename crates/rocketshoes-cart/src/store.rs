//! # Cart Store
//!
//! The live cart shared by the product list, the header badge and the cart
//! page.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    add_product(id)                                      │
//! │                                                                         │
//! │  [mutation gate]      held for the whole call (serialize_mutations)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  snapshot = current cart                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GET /stock/{id} ──► desired > available? ──► StockExceeded ──┐        │
//! │       │                                                        │        │
//! │       ▼                                                        │        │
//! │  in cart? ── yes ──► with_amount(id, desired)                 │        │
//! │       │ no                                                     │        │
//! │       ▼                                                        │        │
//! │  GET /products/{id} ──► with_appended(item, amount 1)         │        │
//! │       │                                                        │        │
//! │       ▼                                                        ▼        │
//! │  mirror.save(next) ── fails ──► OperationFailed ──────► toast + Err    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  watch::send_replace(next)   ← the only place the live cart changes   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The mirror is written before the swap. A failed write leaves both the
//! mirror and the live cart at the previous state.

use std::sync::Arc;

use rocketshoes_core::validation::{check_stock, validate_product};
use rocketshoes_core::{Cart, CartTotals, LineItem, ProductId, INITIAL_LINE_AMOUNT};
use rocketshoes_storage::{CartMirror, SqliteStorage, StorageConfig, StorageError};
use tokio::sync::{watch, Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use crate::config::{CartConfig, CartSettings};
use crate::error::{CartError, CartOperation, CartResult, ConfigError, SetupError};
use crate::http::HttpCatalog;
use crate::services::{NotificationSink, ProductService, StockService};

/// The shopping cart store.
///
/// Share it by `Arc`. Every mutation returns the cart as it is after the
/// call, and on failure also raises a toast through the notification sink
/// (unless `notify_errors` is off).
pub struct CartStore {
    stock: Arc<dyn StockService>,
    products: Arc<dyn ProductService>,
    notifier: Arc<dyn NotificationSink>,
    mirror: CartMirror,
    state: watch::Sender<Cart>,
    gate: Option<Mutex<()>>,
    settings: CartSettings,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("mirror", &self.mirror)
            .field("items", &self.state.borrow().len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates a store and loads the mirrored cart.
    ///
    /// A missing mirror starts an empty cart. So does an unreadable or
    /// corrupt one; it is logged and left in place until the next
    /// successful mutation overwrites it.
    pub async fn open(
        stock: Arc<dyn StockService>,
        products: Arc<dyn ProductService>,
        notifier: Arc<dyn NotificationSink>,
        mirror: CartMirror,
        settings: CartSettings,
    ) -> Self {
        let initial = match mirror.load().await {
            Ok(Some(cart)) => {
                info!(key = mirror.key(), items = cart.len(), "Restored cart from mirror");
                cart
            }
            Ok(None) => {
                info!(key = mirror.key(), "No saved cart, starting empty");
                Cart::new()
            }
            Err(e) => {
                warn!(key = mirror.key(), error = %e, "Ignoring unreadable cart mirror");
                Cart::new()
            }
        };

        let (state, _) = watch::channel(initial);

        CartStore {
            stock,
            products,
            notifier,
            mirror,
            state,
            gate: settings.serialize_mutations.then(|| Mutex::new(())),
            settings,
        }
    }

    /// Wires a store from configuration: HTTP catalog, SQLite mirror.
    pub async fn from_config(
        config: &CartConfig,
        notifier: Arc<dyn NotificationSink>,
    ) -> Result<Self, SetupError> {
        config.validate()?;

        let path = config.storage_path().ok_or_else(|| {
            ConfigError::InvalidConfig("no storage path available on this platform".into())
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;
        }

        let storage = SqliteStorage::new(StorageConfig::new(path)).await?;
        let mirror = CartMirror::with_key(Arc::new(storage), config.storage.key.clone());
        let catalog = Arc::new(HttpCatalog::from_settings(&config.api)?);

        Ok(Self::open(catalog.clone(), catalog, notifier, mirror, config.cart).await)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// A product not yet in the cart is fetched and appended with amount 1.
    /// A product already in the cart has its amount raised by one.
    ///
    /// ## Errors
    /// - `StockExceeded` if the new amount is above available stock
    /// - `OperationFailed` for lookup, decode or storage failures
    pub async fn add_product(&self, product_id: ProductId) -> CartResult<Cart> {
        debug!(product_id = %product_id, "Adding product to cart");
        let _guard = self.begin_mutation().await;
        let result = self.try_add(product_id).await;
        self.finish(CartOperation::Add, result)
    }

    /// Removes a product's line, keeping the others in order.
    ///
    /// ## Errors
    /// - `OperationFailed` if the product is not in the cart or the write fails
    pub async fn remove_product(&self, product_id: ProductId) -> CartResult<Cart> {
        debug!(product_id = %product_id, "Removing product from cart");
        let _guard = self.begin_mutation().await;
        let result = self.try_remove(product_id).await;
        self.finish(CartOperation::Remove, result)
    }

    /// Sets a product's amount.
    ///
    /// An amount of zero or less does nothing: no lookup, no write, no toast.
    ///
    /// ## Errors
    /// - `StockExceeded` if `amount` is above available stock
    /// - `OperationFailed` if the product is not in the cart, or on lookup
    ///   or storage failures
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> CartResult<Cart> {
        if amount <= 0 {
            debug!(product_id = %product_id, amount, "Ignoring non-positive amount");
            return Ok(self.cart());
        }

        debug!(product_id = %product_id, amount, "Updating product amount");
        let _guard = self.begin_mutation().await;
        let result = self.try_update(product_id, amount).await;
        self.finish(CartOperation::Update, result)
    }

    /// Empties the cart (after checkout).
    pub async fn clear(&self) -> CartResult<Cart> {
        debug!("Clearing cart");
        let _guard = self.begin_mutation().await;
        let result = self.commit(CartOperation::Clear, None, Cart::new()).await;
        self.finish(CartOperation::Clear, result)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns a snapshot of the current cart.
    pub fn cart(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Returns a receiver that is notified on every cart change.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    /// Returns the totals summary for the current cart.
    pub fn totals(&self) -> CartTotals {
        self.state.borrow().totals()
    }

    /// Returns the store settings.
    pub fn settings(&self) -> &CartSettings {
        &self.settings
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn begin_mutation(&self) -> Option<MutexGuard<'_, ()>> {
        match &self.gate {
            Some(gate) => Some(gate.lock().await),
            None => None,
        }
    }

    async fn try_add(&self, product_id: ProductId) -> CartResult<Cart> {
        let op = CartOperation::Add;
        let current = self.cart();
        let desired = current.next_add_amount(product_id);

        let stock = self
            .stock
            .get_stock(product_id)
            .await
            .map_err(|e| CartError::from_service(op, product_id, e))?;

        check_stock(product_id, desired, &stock)
            .map_err(|e| CartError::from_core(op, product_id, e))?;

        let transition = if current.contains(product_id) {
            current.with_amount(product_id, desired)
        } else {
            let product = self
                .products
                .get_product(product_id)
                .await
                .map_err(|e| CartError::from_service(op, product_id, e))?;

            validate_product(&product, product_id)
                .map_err(|e| CartError::from_core(op, product_id, e))?;

            current.with_appended(LineItem::new(product, INITIAL_LINE_AMOUNT))
        };

        let next = transition.map_err(|e| CartError::from_core(op, product_id, e))?;
        self.commit(op, Some(product_id), next).await
    }

    async fn try_remove(&self, product_id: ProductId) -> CartResult<Cart> {
        let op = CartOperation::Remove;
        let next = self
            .cart()
            .without(product_id)
            .map_err(|e| CartError::from_core(op, product_id, e))?;

        self.commit(op, Some(product_id), next).await
    }

    async fn try_update(&self, product_id: ProductId, amount: i64) -> CartResult<Cart> {
        let op = CartOperation::Update;
        let current = self.cart();

        let stock = self
            .stock
            .get_stock(product_id)
            .await
            .map_err(|e| CartError::from_service(op, product_id, e))?;

        check_stock(product_id, amount, &stock)
            .map_err(|e| CartError::from_core(op, product_id, e))?;

        let next = current
            .with_amount(product_id, amount)
            .map_err(|e| CartError::from_core(op, product_id, e))?;

        self.commit(op, Some(product_id), next).await
    }

    /// Writes `next` to the mirror, then makes it the live cart.
    ///
    /// Clearing deletes the mirror key; a missing key loads as an empty cart.
    async fn commit(
        &self,
        operation: CartOperation,
        product_id: Option<ProductId>,
        next: Cart,
    ) -> CartResult<Cart> {
        let written = match operation {
            CartOperation::Clear => self.mirror.clear().await,
            _ => self.mirror.save(&next).await,
        };

        if let Err(e) = written {
            error!(
                operation = %operation,
                key = self.mirror.key(),
                error = %e,
                "Failed to write cart mirror"
            );
            return Err(CartError::from_storage(operation, product_id, e));
        }

        self.state.send_replace(next.clone());
        Ok(next)
    }

    fn finish(&self, operation: CartOperation, result: CartResult<Cart>) -> CartResult<Cart> {
        match result {
            Ok(cart) => {
                info!(
                    operation = %operation,
                    items = cart.len(),
                    total_amount = cart.total_amount(),
                    "Cart updated"
                );
                Ok(cart)
            }
            Err(err) => {
                warn!(
                    operation = %operation,
                    product_id = ?err.product_id(),
                    error = %err,
                    "Cart operation failed"
                );
                if self.settings.notify_errors {
                    self.notifier.error(err.user_message(self.settings.locale));
                }
                Err(err)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
