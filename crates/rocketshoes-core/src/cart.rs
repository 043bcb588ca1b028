//! # Cart
//!
//! The cart value and its transitions.
//!
//! ## Transitions Are Pure
//! Every transition borrows the current cart and returns a *new* cart (or a
//! typed error). Nothing mutates in place, so a caller can validate the whole
//! next state before swapping it in.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │  UI Action              Transition                 Next Cart            │
//! │  ─────────              ──────────                 ─────────            │
//! │                                                                         │
//! │  Add (new product) ───► with_appended(item) ─────► [.., item]          │
//! │                                                                         │
//! │  Add (in cart) ───────► with_amount(id, a + 1) ──► items[i].amount++   │
//! │                                                                         │
//! │  Change amount ───────► with_amount(id, n) ──────► items[i].amount = n │
//! │                                                                         │
//! │  Remove ──────────────► without(id) ─────────────► order preserved     │
//! │                                                                         │
//! │  NOTE: the source cart is untouched in every case.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineItem, ProductId};
use crate::validation::{validate_amount, validate_price};

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by product id
/// - Every amount is in `1..=MAX_LINE_AMOUNT`
/// - Every unit price is in `0..=MAX_UNIT_PRICE`
/// - Order is first-insertion order
///
/// Deserialization re-checks the invariants, so a mirror that breaks them
/// never becomes a live cart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from items, checking the invariants.
    pub fn from_items(items: Vec<LineItem>) -> CoreResult<Self> {
        let mut seen = Vec::with_capacity(items.len());
        for item in &items {
            validate_amount(item.amount)?;
            validate_price(item.product.price)?;
            if seen.contains(&item.product_id()) {
                return Err(CoreError::DuplicateItem(item.product_id()));
            }
            seen.push(item.product_id());
        }

        Ok(Cart { items })
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the line item for a product, if present.
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id() == product_id)
    }

    /// Returns true if the product has a line in the cart.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Returns the amount of a product in the cart, if present.
    pub fn amount_of(&self, product_id: ProductId) -> Option<i64> {
        self.get(product_id).map(|i| i.amount)
    }

    /// Amount an "add one more" would request: existing amount plus one, or
    /// one for a product not yet in the cart.
    pub fn next_add_amount(&self, product_id: ProductId) -> i64 {
        self.amount_of(product_id).unwrap_or(0).saturating_add(1)
    }

    /// Returns a cart with `item` appended at the end.
    ///
    /// ## Errors
    /// - `DuplicateItem` if the product already has a line
    /// - `Validation` if the item amount or price is out of range
    pub fn with_appended(&self, item: LineItem) -> CoreResult<Cart> {
        validate_amount(item.amount)?;
        validate_price(item.product.price)?;

        if self.contains(item.product_id()) {
            return Err(CoreError::DuplicateItem(item.product_id()));
        }

        let mut items = self.items.clone();
        items.push(item);
        Ok(Cart { items })
    }

    /// Returns a cart with the product's amount set to `amount`.
    ///
    /// ## Errors
    /// - `Validation` if `amount` is out of range
    /// - `ItemNotFound` if the product has no line
    pub fn with_amount(&self, product_id: ProductId, amount: i64) -> CoreResult<Cart> {
        validate_amount(amount)?;

        let index = self
            .items
            .iter()
            .position(|i| i.product_id() == product_id)
            .ok_or(CoreError::ItemNotFound(product_id))?;

        let mut items = self.items.clone();
        if let Some(item) = items.get_mut(index) {
            item.amount = amount;
        }
        Ok(Cart { items })
    }

    /// Returns a cart without the product's line, other lines in order.
    ///
    /// ## Errors
    /// - `ItemNotFound` if the product has no line
    pub fn without(&self, product_id: ProductId) -> CoreResult<Cart> {
        if !self.contains(product_id) {
            return Err(CoreError::ItemNotFound(product_id));
        }

        let items = self
            .items
            .iter()
            .filter(|i| i.product_id() != product_id)
            .cloned()
            .collect();
        Ok(Cart { items })
    }

    /// Returns the number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total amount over all lines.
    pub fn total_amount(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, i| total.saturating_add(i.amount))
    }

    /// Returns the sum of all line subtotals.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Returns the summary a cart page or header badge displays.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CoreError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Cart::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Cart totals summary for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Distinct products (the header badge count).
    pub item_count: usize,

    /// Sum of all amounts.
    #[ts(type = "number")]
    pub total_amount: i64,

    /// Sum of all line subtotals.
    #[ts(type = "number")]
    pub total: Money,

    /// Amount per product id (what the product list shows on each card).
    #[ts(type = "Record<number, number>")]
    pub amounts: HashMap<ProductId, i64>,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.len(),
            total_amount: cart.total_amount(),
            total: cart.total(),
            amounts: cart
                .items
                .iter()
                .map(|i| (i.product_id(), i.amount))
                .collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;
    use proptest::prelude::*;

    fn test_product(id: u32, price_cents: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product {}", id),
            Money::from_cents(price_cents),
            format!("https://cdn.example.com/{}.jpg", id),
        )
    }

    fn cart_of(ids: &[u32]) -> Cart {
        ids.iter().fold(Cart::new(), |cart, id| {
            cart.with_appended(LineItem::new(test_product(*id, 1000), 1))
                .unwrap()
        })
    }

    fn ids(cart: &Cart) -> Vec<u32> {
        cart.items().iter().map(|i| i.product_id().get()).collect()
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let cart = cart_of(&[3, 1, 2]);
        assert_eq!(ids(&cart), vec![3, 1, 2]);
    }

    #[test]
    fn test_append_rejects_duplicate() {
        let cart = cart_of(&[1]);
        let result = cart.with_appended(LineItem::new(test_product(1, 1000), 1));
        assert_eq!(result, Err(CoreError::DuplicateItem(ProductId::new(1))));
    }

    #[test]
    fn test_with_amount_leaves_source_untouched() {
        let cart = cart_of(&[1, 2]);
        let next = cart.with_amount(ProductId::new(2), 4).unwrap();

        assert_eq!(cart.amount_of(ProductId::new(2)), Some(1));
        assert_eq!(next.amount_of(ProductId::new(2)), Some(4));
        assert_eq!(next.amount_of(ProductId::new(1)), Some(1));
    }

    #[test]
    fn test_with_amount_rejects_zero_and_missing() {
        let cart = cart_of(&[1]);
        assert!(matches!(
            cart.with_amount(ProductId::new(1), 0),
            Err(CoreError::Validation(_))
        ));
        assert_eq!(
            cart.with_amount(ProductId::new(9), 2),
            Err(CoreError::ItemNotFound(ProductId::new(9)))
        );
    }

    #[test]
    fn test_without_missing_item() {
        let cart = cart_of(&[1]);
        assert_eq!(
            cart.without(ProductId::new(2)),
            Err(CoreError::ItemNotFound(ProductId::new(2)))
        );
    }

    #[test]
    fn test_next_add_amount() {
        let cart = cart_of(&[1]).with_amount(ProductId::new(1), 3).unwrap();
        assert_eq!(cart.next_add_amount(ProductId::new(1)), 4);
        assert_eq!(cart.next_add_amount(ProductId::new(2)), 1);
    }

    #[test]
    fn test_amount_ceiling() {
        use crate::validation::MAX_LINE_AMOUNT;

        let full = cart_of(&[1])
            .with_amount(ProductId::new(1), MAX_LINE_AMOUNT)
            .unwrap();
        let next = full.next_add_amount(ProductId::new(1));

        assert_eq!(next, MAX_LINE_AMOUNT + 1);
        assert!(matches!(
            full.with_amount(ProductId::new(1), next),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_totals_at_limits() {
        use crate::validation::{MAX_LINE_AMOUNT, MAX_UNIT_PRICE};

        let cart = (1..=50).fold(Cart::new(), |cart, id| {
            cart.with_appended(LineItem::new(
                test_product(id, MAX_UNIT_PRICE.cents()),
                MAX_LINE_AMOUNT,
            ))
            .unwrap()
        });

        let totals = cart.totals();
        assert_eq!(totals.total_amount, 50 * MAX_LINE_AMOUNT);
        assert_eq!(
            totals.total.cents(),
            50 * MAX_UNIT_PRICE.cents() * MAX_LINE_AMOUNT
        );
    }

    #[test]
    fn test_totals() {
        let cart = Cart::new()
            .with_appended(LineItem::new(test_product(1, 17990), 2))
            .unwrap()
            .with_appended(LineItem::new(test_product(2, 13990), 1))
            .unwrap();

        let totals = cart.totals();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_amount, 3);
        assert_eq!(totals.total.cents(), 49970);
        assert_eq!(totals.amounts.get(&ProductId::new(1)), Some(&2));
    }

    #[test]
    fn test_deserialize_checks_invariants() {
        let duplicate = r#"[
            {"id":1,"title":"A","price":10,"image":"a","amount":1},
            {"id":1,"title":"A","price":10,"image":"a","amount":2}
        ]"#;
        assert!(serde_json::from_str::<Cart>(duplicate).is_err());

        let zero = r#"[{"id":1,"title":"A","price":10,"image":"a","amount":0}]"#;
        assert!(serde_json::from_str::<Cart>(zero).is_err());

        let huge_amount =
            r#"[{"id":1,"title":"A","price":10,"image":"a","amount":9223372036854775807}]"#;
        assert!(serde_json::from_str::<Cart>(huge_amount).is_err());

        let huge_price = r#"[{"id":1,"title":"A","price":1e15,"image":"a","amount":100000}]"#;
        assert!(serde_json::from_str::<Cart>(huge_price).is_err());

        let valid = r#"[{"id":1,"title":"A","price":10,"image":"a","amount":2}]"#;
        let cart: Cart = serde_json::from_str(valid).unwrap();
        assert_eq!(cart.amount_of(ProductId::new(1)), Some(2));
    }

    #[test]
    fn test_serializes_as_array() {
        let cart = cart_of(&[1]);
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["amount"], 1);
    }

    proptest! {
        #[test]
        fn prop_append_new_product_lands_at_end(
            existing in proptest::collection::btree_set(1u32..500, 0..20),
            new_id in 500u32..1000,
        ) {
            let existing: Vec<u32> = existing.into_iter().collect();
            let cart = cart_of(&existing);
            let next = cart
                .with_appended(LineItem::new(test_product(new_id, 500), 1))
                .unwrap();

            prop_assert_eq!(next.len(), cart.len() + 1);
            let last = next.items().last().unwrap();
            prop_assert_eq!(last.product_id(), ProductId::new(new_id));
            prop_assert_eq!(last.amount, 1);
        }

        #[test]
        fn prop_without_preserves_relative_order(
            present in proptest::collection::btree_set(1u32..200, 1..20),
            pick in any::<prop::sample::Index>(),
        ) {
            let present: Vec<u32> = present.into_iter().collect();
            let target = present[pick.index(present.len())];
            let cart = cart_of(&present);

            let next = cart.without(ProductId::new(target)).unwrap();
            let expected: Vec<u32> = present.iter().copied().filter(|id| *id != target).collect();
            prop_assert_eq!(ids(&next), expected);
        }

        #[test]
        fn prop_with_amount_touches_only_target(
            present in proptest::collection::btree_set(1u32..200, 1..20),
            pick in any::<prop::sample::Index>(),
            amount in 1i64..1000,
        ) {
            let present: Vec<u32> = present.into_iter().collect();
            let target = present[pick.index(present.len())];
            let cart = cart_of(&present);

            let next = cart.with_amount(ProductId::new(target), amount).unwrap();
            for item in &next {
                let expected = if item.product_id().get() == target { amount } else { 1 };
                prop_assert_eq!(item.amount, expected);
            }
            prop_assert_eq!(ids(&next), present);
        }

        #[test]
        fn prop_mirror_round_trip(
            present in proptest::collection::btree_set(1u32..200, 0..20),
            price in 0i64..1_000_000,
        ) {
            let cart = present.iter().fold(Cart::new(), |cart, id| {
                cart.with_appended(LineItem::new(test_product(*id, price), i64::from(*id % 7) + 1))
                    .unwrap()
            });

            let json = serde_json::to_string(&cart).unwrap();
            let decoded: Cart = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(decoded, cart);
        }
    }
}
