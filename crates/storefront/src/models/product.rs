//! Product record type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shophub_core::{CartLine, Category, Price, ProductId};

/// A catalog product.
///
/// Mutated only by admin create/update/delete; stock is decremented on
/// order placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Catalog category.
    pub category: Category,
    /// Short description.
    pub description: String,
    /// Units in stock. Never negative; checkout floors at zero.
    pub stock: u32,
    /// Image URL.
    pub image: String,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether at least one unit can be added to a cart.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Snapshot this product as a cart line.
    ///
    /// Copies the product fields at add-time, so later catalog edits do
    /// not affect lines already in a cart. See
    /// [`Cart::add`](shophub_core::Cart::add) for the quantity-merge rule.
    #[must_use]
    pub fn to_cart_line(&self) -> CartLine {
        CartLine {
            product_id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            category: self.category,
            description: self.description.clone(),
            image: self.image.clone(),
            quantity: 1,
        }
    }
}

/// Fields for creating or replacing a product (admin form payload).
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub category: Category,
    pub description: String,
    pub stock: u32,
    pub image: String,
}
