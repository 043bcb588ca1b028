//! # Error Types
//!
//! Domain-specific error types for rocketshoes-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rocketshoes-core errors (this file)                                   │
//! │  ├── CoreError        - Cart rule violations                           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  rocketshoes-storage errors                                            │
//! │  └── StorageError     - Mirror read/write failures                     │
//! │                                                                         │
//! │  rocketshoes-cart errors                                               │
//! │  └── CartError        - What callers see: StockExceeded or             │
//! │                         OperationFailed                                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                  │
//! │        StorageError ────────────────┼──► CartError → Notification      │
//! │        ServiceError ────────────────┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Cart rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No line item for the product.
    #[error("Product {0} is not in the cart")]
    ItemNotFound(ProductId),

    /// A second line item for a product already in the cart.
    #[error("Product {0} is already in the cart")]
    DuplicateItem(ProductId),

    /// Requested amount is above the available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "+" (amount 3 → 4)
    ///      │
    ///      ▼
    /// GET /stock/1 → { amount: 3 }
    ///      │
    ///      ▼
    /// StockExceeded { product_id: 1, requested: 4, available: 3 }
    ///      │
    ///      ▼
    /// Toast: "Requested quantity out of stock"
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    StockExceeded {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// The catalog answered with a different product than the one asked for.
    #[error("Requested product {requested} but catalog returned {received}")]
    ProductMismatch {
        requested: ProductId,
        received: ProductId,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive, got {value}")]
    MustBePositive { field: String, value: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value is above the accepted maximum.
    #[error("{field} must be at most {max}, got {value}")]
    TooLarge { field: String, value: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::StockExceeded {
            product_id: ProductId::new(1),
            requested: 4,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 1: available 3, requested 4"
        );
        assert_eq!(
            CoreError::ItemNotFound(ProductId::new(7)).to_string(),
            "Product 7 is not in the cart"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "amount".to_string(),
            value: 0,
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
