//! # Domain Types
//!
//! Types shared by the cart, the stock/product API and the storage mirror.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Product      │   │     Stock       │   │     LineItem        │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │   │  id             │   │  ..Product (flat)   │   │
//! │  │  title          │   │  amount         │   │  amount (>= 1)      │   │
//! │  │  price          │   └─────────────────┘   └─────────────────────┘   │
//! │  │  image          │                                                    │
//! │  └─────────────────┘   GET /products/{id}    GET /stock/{id}            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! A `LineItem` is the product record with `amount` added next to the
//! product fields, not nested:
//! ```json
//! { "id": 1, "title": "Tênis", "price": 179.9, "image": "https://...", "amount": 2 }
//! ```
//!
//! Catalog fields this crate has no use for (a `brand`, a `sizes` list) are
//! kept in [`Product::extra`] and written back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Identifier of a catalog product. Unique within a cart.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(u32);

impl ProductId {
    /// Wraps a raw catalog id.
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    /// Returns the raw catalog id.
    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product record as returned by `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,

    /// Display name.
    pub title: String,

    /// Unit price. Serialized as a decimal number.
    #[ts(type = "number")]
    pub price: Money,

    /// Image URL shown in the product list and cart page.
    pub image: String,

    /// Any other attributes the catalog sent.
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Creates a product with no extra attributes.
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        Product {
            id,
            title: title.into(),
            price,
            image: image.into(),
            extra: Map::new(),
        }
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Available stock as returned by `GET /stock/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Stock {
    /// Product the stock entry belongs to.
    pub id: ProductId,

    /// Units available.
    #[ts(type = "number")]
    pub amount: i64,
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart plus its requested amount.
///
/// ## Invariant
/// `amount >= 1`. The [`Cart`](crate::Cart) transitions enforce it; this type
/// only carries the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Product display attributes, frozen when first added.
    #[serde(flatten)]
    pub product: Product,

    /// Requested amount.
    #[ts(type = "number")]
    pub amount: i64,
}

impl LineItem {
    /// Creates a line item from a product and amount.
    pub fn new(product: Product, amount: i64) -> Self {
        LineItem { product, amount }
    }

    /// Product id of this line.
    #[inline]
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times amount.
    pub fn subtotal(&self) -> Money {
        self.product.price.multiply_amount(self.amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
