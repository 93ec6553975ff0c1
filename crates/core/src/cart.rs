//! The session cart state machine.
//!
//! A cart is an ordered list of lines, one per product. Lines snapshot the
//! product's fields at add-time, so later catalog edits do not rewrite what
//! the shopper already put in the cart. All operations are pure and
//! synchronous; the cart is serialized into the session between requests.
//!
//! The cart itself does no stock validation - the out-of-stock guard lives
//! at the interaction boundary, not here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Category, Price, ProductId};

/// One product entry in the cart.
///
/// Invariant: `quantity >= 1`. A quantity of zero is expressed by removing
/// the line, which [`Cart::update`] does automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The referenced product.
    pub product_id: ProductId,
    /// Product name at add-time.
    pub name: String,
    /// Unit price at add-time.
    pub price: Price,
    /// Category at add-time.
    pub category: Category,
    /// Description at add-time.
    pub description: String,
    /// Image URL at add-time.
    pub image: String,
    /// Units of this product in the cart.
    pub quantity: u32,
}

impl CartLine {
    /// The extended price for this line (`price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.times(self.quantity)
    }
}

/// The active session's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a product snapshot to the cart.
    ///
    /// If a line for the same product already exists its quantity is
    /// incremented by one and the new snapshot is discarded; otherwise the
    /// snapshot is appended as a new line with quantity 1.
    pub fn add(&mut self, snapshot: CartLine) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == snapshot.product_id)
        {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                quantity: 1,
                ..snapshot
            });
        }
    }

    /// Set the quantity of a line.
    ///
    /// A quantity of zero removes the line. Updating a product that is not
    /// in the cart is a no-op.
    pub fn update(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| &line.product_id == product_id)
        {
            line.quantity = quantity;
        }
    }

    /// Remove a line unconditionally.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.lines.retain(|line| &line.product_id != product_id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The cart total: sum of `price * quantity` across lines.
    ///
    /// Exact decimal arithmetic; rounding is a display concern.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}
