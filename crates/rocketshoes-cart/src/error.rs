//! # Cart Error Types
//!
//! What callers of the cart store see when an operation fails.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Error Categories                              │
//! │                                                                         │
//! │  ┌──────────────────────────┐   ┌───────────────────────────────────┐  │
//! │  │     StockExceeded        │   │        OperationFailed            │  │
//! │  │  requested > available   │   │  network, decode, storage,        │  │
//! │  │                          │   │  product missing from cart/API    │  │
//! │  └──────────────────────────┘   └───────────────────────────────────┘  │
//! │                                                                         │
//! │  ServiceError, StorageError and CoreError never reach callers as-is:   │
//! │  they are folded into one of the two kinds above, with the cause       │
//! │  kept as text in `reason`.                                             │
//! │                                                                         │
//! │  ┌──────────────────────────┐   ┌───────────────────────────────────┐  │
//! │  │      ConfigError         │   │          SetupError               │  │
//! │  │  cart.toml, env vars     │   │  opening storage and HTTP client  │  │
//! │  └──────────────────────────┘   └───────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use rocketshoes_core::{CoreError, Locale, Notice, ProductId};
use rocketshoes_storage::StorageError;
use thiserror::Error;

use crate::services::ServiceError;

// =============================================================================
// Cart Operation
// =============================================================================

/// The cart operation an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    Update,
    Clear,
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartOperation::Add => write!(f, "add product"),
            CartOperation::Remove => write!(f, "remove product"),
            CartOperation::Update => write!(f, "update product amount"),
            CartOperation::Clear => write!(f, "clear cart"),
        }
    }
}

/// Coarse classification of a [`CartError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    StockExceeded,
    OperationFailed,
}

// =============================================================================
// Cart Error
// =============================================================================

/// Errors returned by `CartStore` operations.
///
/// ## User Workflow
/// ```text
/// update_product_amount(1, 10)
///      │
///      ▼
/// GET /stock/1 → { amount: 5 }
///      │
///      ▼
/// Err(StockExceeded { product_id: 1, requested: 10, available: 5 })
///      │
///      ├──► returned to the caller
///      └──► NotificationSink: "Requested quantity out of stock"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Requested amount is above available stock.
    #[error("Requested quantity out of stock for product {product_id}: available {available}, requested {requested}")]
    StockExceeded {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Anything else went wrong. The cart is unchanged.
    #[error("Failed to {operation}{}: {reason}", target_suffix(.product_id))]
    OperationFailed {
        operation: CartOperation,
        product_id: Option<ProductId>,
        reason: String,
    },
}

fn target_suffix(product_id: &Option<ProductId>) -> String {
    match product_id {
        Some(id) => format!(" {}", id),
        None => String::new(),
    }
}

impl CartError {
    /// Creates an OperationFailed error for a product.
    pub fn failed(operation: CartOperation, product_id: ProductId, reason: impl ToString) -> Self {
        CartError::OperationFailed {
            operation,
            product_id: Some(product_id),
            reason: reason.to_string(),
        }
    }

    /// Folds a cart rule violation into the two caller-facing kinds.
    pub fn from_core(operation: CartOperation, product_id: ProductId, err: CoreError) -> Self {
        match err {
            CoreError::StockExceeded {
                product_id,
                requested,
                available,
            } => CartError::StockExceeded {
                product_id,
                requested,
                available,
            },
            other => CartError::failed(operation, product_id, other),
        }
    }

    /// Folds a stock/product API failure.
    pub fn from_service(operation: CartOperation, product_id: ProductId, err: ServiceError) -> Self {
        CartError::failed(operation, product_id, err)
    }

    /// Folds a mirror write failure.
    pub fn from_storage(
        operation: CartOperation,
        product_id: Option<ProductId>,
        err: StorageError,
    ) -> Self {
        CartError::OperationFailed {
            operation,
            product_id,
            reason: err.to_string(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::StockExceeded { .. } => ErrorKind::StockExceeded,
            CartError::OperationFailed { .. } => ErrorKind::OperationFailed,
        }
    }

    /// Returns the product the failed operation targeted, if any.
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            CartError::StockExceeded { product_id, .. } => Some(*product_id),
            CartError::OperationFailed { product_id, .. } => *product_id,
        }
    }

    /// Returns the toast this error raises.
    ///
    /// Clearing has no toast of its own and shares the removal one.
    pub fn notice(&self) -> Notice {
        match self {
            CartError::StockExceeded { .. } => Notice::OutOfStock,
            CartError::OperationFailed { operation, .. } => match operation {
                CartOperation::Add => Notice::AddFailed,
                CartOperation::Remove | CartOperation::Clear => Notice::RemoveFailed,
                CartOperation::Update => Notice::UpdateFailed,
            },
        }
    }

    /// Returns the user-facing message in the given locale.
    pub fn user_message(&self, locale: Locale) -> &'static str {
        self.notice().text(locale)
    }
}

/// Result type for cart operations.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors loading, validating, or saving `cart.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting has an invalid value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The API base URL is malformed or not http(s).
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    SaveFailed(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SaveFailed(err.to_string())
    }
}

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors building a `CartStore` from configuration.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Storage unavailable: {0}")]
    Storage(#[from] StorageError),

    #[error("Catalog client unavailable: {0}")]
    Catalog(#[from] ServiceError),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CartError::StockExceeded {
            product_id: ProductId::new(1),
            requested: 10,
            available: 5,
        };
        assert_eq!(
            err.to_string(),
            "Requested quantity out of stock for product 1: available 5, requested 10"
        );

        let err = CartError::failed(CartOperation::Remove, ProductId::new(4), "not in cart");
        assert_eq!(err.to_string(), "Failed to remove product 4: not in cart");

        let err = CartError::OperationFailed {
            operation: CartOperation::Clear,
            product_id: None,
            reason: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to clear cart: disk full");
    }

    #[test]
    fn test_core_errors_fold_into_two_kinds() {
        let stock = CartError::from_core(
            CartOperation::Update,
            ProductId::new(1),
            CoreError::StockExceeded {
                product_id: ProductId::new(1),
                requested: 3,
                available: 2,
            },
        );
        assert_eq!(stock.kind(), ErrorKind::StockExceeded);

        let missing = CartError::from_core(
            CartOperation::Update,
            ProductId::new(1),
            CoreError::ItemNotFound(ProductId::new(1)),
        );
        assert_eq!(missing.kind(), ErrorKind::OperationFailed);
        assert_eq!(missing.product_id(), Some(ProductId::new(1)));
    }

    #[test]
    fn test_user_messages() {
        let id = ProductId::new(1);
        assert_eq!(
            CartError::failed(CartOperation::Add, id, "x").user_message(Locale::En),
            "Failed to add product"
        );
        assert_eq!(
            CartError::failed(CartOperation::Update, id, "x").user_message(Locale::PtBr),
            "Erro na alteração de quantidade do produto"
        );
        assert_eq!(
            CartError::StockExceeded {
                product_id: id,
                requested: 2,
                available: 1
            }
            .user_message(Locale::PtBr),
            "Quantidade solicitada fora de estoque"
        );
    }
}
