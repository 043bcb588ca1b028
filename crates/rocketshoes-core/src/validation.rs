//! # Validation Module
//!
//! Amount and stock rules applied before any cart transition.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Each Rule Runs                               │
//! │                                                                         │
//! │  update_product_amount(id, n)                                          │
//! │       │                                                                 │
//! │       ├── n <= 0?            → no-op (caller short-circuits)           │
//! │       │                                                                 │
//! │       ├── check_stock(n)     → StockExceeded                           │
//! │       │                                                                 │
//! │       └── Cart::with_amount  → validate_amount (n >= 1), ItemNotFound  │
//! │                                                                         │
//! │  add_product(id)                                                        │
//! │       ├── check_stock(existing + 1)                                    │
//! │       └── validate_product(fetched, id)  → ProductMismatch             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Product, ProductId, Stock};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Most units a single line may hold.
pub const MAX_LINE_AMOUNT: i64 = 1_000_000;

/// Highest unit price the cart accepts (R$ 100.000.000,00).
///
/// With [`MAX_LINE_AMOUNT`] a line subtotal stays below 10^16 cents, far
/// inside `i64`.
pub const MAX_UNIT_PRICE: Money = Money::from_cents(10_000_000_000);

// =============================================================================
// Amount Validators
// =============================================================================

/// Validates a line amount.
///
/// ## Rules
/// - Must be positive (>= 1). A line is never stored with amount 0.
/// - Must not exceed [`MAX_LINE_AMOUNT`]
///
/// ## Example
/// ```rust
/// use rocketshoes_core::validation::{validate_amount, MAX_LINE_AMOUNT};
///
/// assert!(validate_amount(1).is_ok());
/// assert!(validate_amount(0).is_err());
/// assert!(validate_amount(-1).is_err());
/// assert!(validate_amount(MAX_LINE_AMOUNT + 1).is_err());
/// ```
pub fn validate_amount(amount: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
            value: amount,
        });
    }

    if amount > MAX_LINE_AMOUNT {
        return Err(ValidationError::TooLarge {
            field: "amount".to_string(),
            value: amount,
            max: MAX_LINE_AMOUNT,
        });
    }

    Ok(())
}

/// Validates a unit price: not negative, at most [`MAX_UNIT_PRICE`].
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    if price > MAX_UNIT_PRICE {
        return Err(ValidationError::TooLarge {
            field: "price".to_string(),
            value: price.cents(),
            max: MAX_UNIT_PRICE.cents(),
        });
    }

    Ok(())
}

/// Checks a requested amount against the stock the API reported.
///
/// Requesting exactly the available amount is allowed.
///
/// ## Example
/// ```rust
/// use rocketshoes_core::{ProductId, Stock};
/// use rocketshoes_core::validation::check_stock;
///
/// let stock = Stock { id: ProductId::new(1), amount: 3 };
/// assert!(check_stock(ProductId::new(1), 3, &stock).is_ok());
/// assert!(check_stock(ProductId::new(1), 4, &stock).is_err());
/// ```
pub fn check_stock(product_id: ProductId, requested: i64, stock: &Stock) -> CoreResult<()> {
    if requested > stock.amount {
        return Err(CoreError::StockExceeded {
            product_id,
            requested,
            available: stock.amount,
        });
    }

    Ok(())
}

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a product fetched from the catalog before it enters the cart.
///
/// ## Rules
/// - Its id must be the id that was requested
/// - Title must not be blank
/// - Price must pass [`validate_price`]
pub fn validate_product(product: &Product, requested: ProductId) -> CoreResult<()> {
    if product.id != requested {
        return Err(CoreError::ProductMismatch {
            requested,
            received: product.id,
        });
    }

    if product.title.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        }
        .into());
    }

    validate_price(product.price)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u32) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product {}", id),
            Money::from_cents(9990),
            "",
        )
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(1).is_ok());
        assert!(validate_amount(999).is_ok());
        assert!(validate_amount(0).is_err());
        assert!(validate_amount(-5).is_err());
        assert!(validate_amount(MAX_LINE_AMOUNT).is_ok());
        assert_eq!(
            validate_amount(i64::MAX),
            Err(ValidationError::TooLarge {
                field: "amount".to_string(),
                value: i64::MAX,
                max: MAX_LINE_AMOUNT,
            })
        );
    }

    #[test]
    fn test_validate_price_bounds() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(MAX_UNIT_PRICE).is_ok());
        assert!(validate_price(Money::from_cents(MAX_UNIT_PRICE.cents() + 1)).is_err());
        assert!(validate_price(Money::from_cents(-1)).is_err());

        // Worst-case line subtotal still fits
        assert!(MAX_UNIT_PRICE
            .cents()
            .checked_mul(MAX_LINE_AMOUNT)
            .is_some());
    }

    #[test]
    fn test_check_stock_boundary() {
        let stock = Stock {
            id: ProductId::new(1),
            amount: 5,
        };
        assert!(check_stock(ProductId::new(1), 5, &stock).is_ok());
        assert_eq!(
            check_stock(ProductId::new(1), 6, &stock),
            Err(CoreError::StockExceeded {
                product_id: ProductId::new(1),
                requested: 6,
                available: 5,
            })
        );
    }

    #[test]
    fn test_zero_stock_rejects_everything() {
        let stock = Stock {
            id: ProductId::new(2),
            amount: 0,
        };
        assert!(check_stock(ProductId::new(2), 1, &stock).is_err());
    }

    #[test]
    fn test_validate_product() {
        assert!(validate_product(&product(1), ProductId::new(1)).is_ok());
        assert!(matches!(
            validate_product(&product(2), ProductId::new(1)),
            Err(CoreError::ProductMismatch { .. })
        ));

        let mut blank = product(1);
        blank.title = "  ".to_string();
        assert!(validate_product(&blank, ProductId::new(1)).is_err());

        let mut negative = product(1);
        negative.price = Money::from_cents(-1);
        assert!(validate_product(&negative, ProductId::new(1)).is_err());

        let mut pricey = product(1);
        pricey.price = Money::from_decimal(1e15).unwrap();
        assert!(matches!(
            validate_product(&pricey, ProductId::new(1)),
            Err(CoreError::Validation(ValidationError::TooLarge { .. }))
        ));
    }
}
