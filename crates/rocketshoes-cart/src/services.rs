//! # Collaborator Traits
//!
//! The seams the cart store talks through. Production wiring uses
//! [`HttpCatalog`](crate::http::HttpCatalog) for both lookups and one of the
//! notifiers in [`notify`](crate::notify). Tests plug in fakes.

use async_trait::async_trait;
use rocketshoes_core::{Product, ProductId, Stock};
use thiserror::Error;

/// Stock/product lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The API has no record for the product.
    #[error("{resource} {product_id} not found")]
    NotFound {
        resource: &'static str,
        product_id: ProductId,
    },

    /// Transport failure, timeout, or a non-success status.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The body could not be decoded into the expected record.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for collaborator calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Reports how many units of a product are available.
#[async_trait]
pub trait StockService: Send + Sync {
    async fn get_stock(&self, product_id: ProductId) -> ServiceResult<Stock>;
}

/// Fetches the display record of a product.
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn get_product(&self, product_id: ProductId) -> ServiceResult<Product>;
}

/// Shows a transient error message to the user.
///
/// Fire-and-forget: implementations must not block and cannot fail.
pub trait NotificationSink: Send + Sync {
    fn error(&self, message: &str);
}
