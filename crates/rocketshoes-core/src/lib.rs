//! # rocketshoes-core: Pure Cart Logic for RocketShoes
//!
//! This crate holds the cart's domain types and every state transition as
//! pure functions. Nothing here touches storage or the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      RocketShoes Cart Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Storefront UI (web)                        │   │
//! │  │      Product list ──► Header badge ──► Cart page                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ add / remove / update                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  rocketshoes-cart (CartStore)                   │   │
//! │  │      stock lookups, notifications, mirror writes                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ rocketshoes-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  stock    │  │   │
//! │  │   │  LineItem │  │           │  │  Totals   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductId, Product, Stock, LineItem)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - The cart and its pure transitions
//! - [`error`] - Domain error types
//! - [`validation`] - Amount and stock rules
//! - [`messages`] - User-facing message catalogs
//!
//! ## Example Usage
//!
//! ```rust
//! use rocketshoes_core::{Cart, LineItem, Money, Product, ProductId};
//!
//! let product = Product::new(
//!     ProductId::new(1),
//!     "Tênis de Caminhada Leve Confortável",
//!     Money::from_cents(17990),
//!     "https://example.com/shoe.jpg",
//! );
//!
//! let cart = Cart::new();
//! let next = cart.with_appended(LineItem::new(product, 1)).unwrap();
//!
//! // Transitions never touch the original
//! assert!(cart.is_empty());
//! assert_eq!(next.amount_of(ProductId::new(1)), Some(1));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod messages;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use messages::{Locale, Notice};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart mirror lives under.
///
/// Kept identical to the key the storefront has always used, so a cart saved
/// by an older build is picked up on the next session.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Amount given to a product the first time it is added to the cart.
pub const INITIAL_LINE_AMOUNT: i64 = 1;
