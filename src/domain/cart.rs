use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{CartItem, ProductId};

/// Items that cannot form a cart: a repeated id or a line with no units.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("cart items break cart invariants: duplicate ids or a zero amount")]
pub struct InvalidCart {
    pub items: Vec<CartItem>,
}

/// Ordered, unique-by-id list of cart items.
///
/// Order is the order in which products were first added. Every item holds at
/// least one unit. The mutation helpers below never touch `self`; they return
/// the candidate next snapshot so the caller can validate and persist it before
/// anyone else sees it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of the quantities held across all products.
    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Checks that ids are unique and every amount is at least one.
    pub fn is_valid(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.items.len());
        self.items
            .iter()
            .all(|item| item.amount >= 1 && seen.insert(item.id))
    }

    /// Returns a copy with `item` appended, or `None` if its id is already present.
    pub fn with_item_appended(&self, item: CartItem) -> Option<Cart> {
        if self.contains(item.id) {
            return None;
        }
        let mut items = self.items.clone();
        items.push(item);
        Some(Cart { items })
    }

    /// Returns a copy where the item `id` holds `amount` units, keeping its position.
    ///
    /// `None` if the item is absent or `amount` is zero.
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Option<Cart> {
        if amount == 0 || !self.contains(id) {
            return None;
        }
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id == id {
                    CartItem { amount, ..item.clone() }
                } else {
                    item.clone()
                }
            })
            .collect();
        Some(Cart { items })
    }

    /// Returns a copy without the item `id`, or `None` if it was not in the cart.
    pub fn without(&self, id: ProductId) -> Option<Cart> {
        if !self.contains(id) {
            return None;
        }
        let items = self.items.iter().filter(|item| item.id != id).cloned().collect();
        Some(Cart { items })
    }
}

impl TryFrom<Vec<CartItem>> for Cart {
    type Error = InvalidCart;

    /// Builds a cart from raw items, handing them back if they break an invariant.
    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        let cart = Cart { items };
        if cart.is_valid() {
            Ok(cart)
        } else {
            Err(InvalidCart { items: cart.items })
        }
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;

    fn item(id: ProductId, amount: u32) -> CartItem {
        CartItem::from_product(Product::new(id, format!("product {id}"), 10.0, ""), amount)
    }

    fn cart(items: Vec<CartItem>) -> Cart {
        Cart::try_from(items).unwrap()
    }

    #[test]
    fn test_appending_keeps_insertion_order() {
        let base = cart(vec![item(7, 1)]);
        let next = base.with_item_appended(item(5, 1)).unwrap();

        let ids: Vec<_> = next.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![7, 5]);
        // The source snapshot is untouched.
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn test_appending_duplicate_is_refused() {
        let base = cart(vec![item(5, 1)]);
        assert!(base.with_item_appended(item(5, 1)).is_none());
    }

    #[test]
    fn test_with_amount_replaces_in_place() {
        let base = cart(vec![item(5, 2), item(7, 1)]);
        let next = base.with_amount(5, 3).unwrap();

        assert_eq!(next.get(5).map(|i| i.amount), Some(3));
        assert_eq!(next.items()[0].id, 5);
        assert_eq!(base.get(5).map(|i| i.amount), Some(2));
    }

    #[test]
    fn test_with_amount_rejects_zero_and_missing() {
        let base = cart(vec![item(5, 2)]);
        assert!(base.with_amount(5, 0).is_none());
        assert!(base.with_amount(9, 1).is_none());
    }

    #[test]
    fn test_without_removes_only_target() {
        let base = cart(vec![item(5, 1), item(7, 4)]);
        let next = base.without(5).unwrap();

        assert_eq!(next.len(), 1);
        assert!(next.contains(7));
        assert!(base.without(42).is_none());
    }

    #[test]
    fn test_totals() {
        let base = cart(vec![item(5, 2), item(7, 3)]);
        assert_eq!(base.total_units(), 5);
        assert!((base.subtotal() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_snapshots_are_rejected() {
        assert!(Cart::try_from(vec![item(5, 0)]).is_err());
        assert!(Cart::try_from(vec![item(5, 1), item(5, 2)]).is_err());
        assert!(Cart::try_from(Vec::new()).is_ok());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let base = cart(vec![item(5, 1)]);
        let json = serde_json::to_value(&base).unwrap();

        assert!(json.is_array());
        assert_eq!(json[0]["amount"], 1);
    }

    #[test]
    fn test_deserializing_enforces_invariants() {
        let duplicate = r#"[{"id":5,"name":"a","price":1.0,"image":"","amount":1},
                            {"id":5,"name":"a","price":1.0,"image":"","amount":2}]"#;
        let empty_line = r#"[{"id":5,"name":"a","price":1.0,"image":"","amount":0}]"#;

        assert!(serde_json::from_str::<Cart>(duplicate).is_err());
        assert!(serde_json::from_str::<Cart>(empty_line).is_err());

        let valid = r#"[{"id":5,"name":"a","price":1.0,"image":"","amount":2}]"#;
        let cart: Cart = serde_json::from_str(valid).unwrap();
        assert_eq!(cart.get(5).map(|i| i.amount), Some(2));
    }

    #[test]
    fn test_rejected_items_are_handed_back() {
        let err = Cart::try_from(vec![item(5, 0)]).unwrap_err();
        assert_eq!(err.items, vec![item(5, 0)]);
    }
}
