//! # rocketshoes-cart: The RocketShoes Shopping Cart Store
//!
//! Owns the live cart for the storefront UI: checks stock before every
//! change, mirrors the cart to local storage, and raises a toast when an
//! operation fails.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Store Wiring                                 │
//! │                                                                         │
//! │   Product list        Header badge          Cart page                  │
//! │   add_product()       subscribe()           update / remove / totals   │
//! │        │                   │                      │                    │
//! │        └───────────────────┼──────────────────────┘                    │
//! │                            ▼                                            │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     CartStore (store.rs)                        │   │
//! │  │   mutation gate • pure transition • mirror write • swap         │   │
//! │  └─────┬──────────────────────┬──────────────────────┬─────────────┘   │
//! │        │                      │                      │                 │
//! │  StockService /        CartMirror            NotificationSink          │
//! │  ProductService        (rocketshoes-         (notify.rs)               │
//! │  (http.rs)              storage)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The cart store and its four operations
//! - [`services`] - Collaborator traits (stock, product, notifications)
//! - [`http`] - reqwest client for the stock/product API
//! - [`notify`] - Notification sinks
//! - [`config`] - `cart.toml` and environment configuration
//! - [`telemetry`] - Tracing subscriber setup
//! - [`error`] - Cart, config and setup errors
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rocketshoes_cart::{CartConfig, CartStore, ProductId, TracingNotifier};
//!
//! rocketshoes_cart::telemetry::init_tracing();
//!
//! let config = CartConfig::load(None)?;
//! let store = Arc::new(CartStore::from_config(&config, Arc::new(TracingNotifier)).await?);
//!
//! store.add_product(ProductId::new(1)).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod http;
pub mod notify;
pub mod services;
pub mod store;
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ApiSettings, CartConfig, CartSettings, StorageSettings};
pub use error::{
    CartError, CartOperation, CartResult, ConfigError, ConfigResult, ErrorKind, SetupError,
};
pub use http::HttpCatalog;
pub use notify::{BroadcastNotifier, RecordingNotifier, TracingNotifier};
pub use services::{NotificationSink, ProductService, ServiceError, ServiceResult, StockService};
pub use store::CartStore;

pub use rocketshoes_core::{Cart, CartTotals, LineItem, Locale, Money, Product, ProductId, Stock};
