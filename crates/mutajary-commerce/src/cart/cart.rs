//! Cart and line item types.

use crate::ids::ProductId;
use crate::money::Price;
use serde::{Deserialize, Serialize};

/// A line item in the cart.
///
/// Name and price are copied from the product when it is first added and
/// are not refreshed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product identifier.
    pub id: ProductId,
    /// Product name at the time it was added.
    pub name: String,
    /// Unit price at the time it was added.
    pub price: Price,
    /// Number of units.
    pub quantity: u32,
}

impl CartItem {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity: 1,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Unit price times quantity, saturating.
    pub fn line_total(&self) -> Price {
        self.price.saturating_multiply(self.quantity)
    }
}

/// A shopping cart: line items in insertion order, unique by product id.
///
/// Serializes as a bare JSON array of items. Repeated ids in stored data
/// are merged on load and lines with a zero quantity are dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Cart::from_items(items)
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from items, merging repeated ids into the first
    /// occurrence. Zero-quantity lines are skipped.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity == 0 {
                tracing::debug!(product_id = %item.id, "skipping zero-quantity line");
                continue;
            }
            match cart.items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity)
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Add one unit of a product.
    ///
    /// An existing line gets its quantity bumped and keeps its original name
    /// and price; otherwise a new line with quantity 1 is appended.
    pub fn add(&mut self, id: &ProductId, name: &str, price: Price) -> &CartItem {
        let index = match self.items.iter().position(|i| &i.id == id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(1);
                index
            }
            None => {
                self.items.push(CartItem::new(id.clone(), name, price));
                self.items.len() - 1
            }
        };
        &self.items[index]
    }

    /// Remove the whole line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() < len_before
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Get an item by product id.
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of price × quantity over all lines. Clamps instead of
    /// overflowing.
    pub fn total(&self) -> Price {
        self.items
            .iter()
            .fold(Price::ZERO, |acc, item| acc.saturating_add(&item.line_total()))
    }
}
