//! Order record type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shophub_core::{Cart, CartLine, OrderId, OrderStatus, UserId};

/// An immutable snapshot of a completed checkout.
///
/// Once created, only the status may change (and only along the legal
/// transitions of [`OrderStatus`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID (time-based).
    pub id: OrderId,
    /// The user who placed the order.
    pub user_id: UserId,
    /// The cart lines, snapshotted verbatim at checkout.
    pub items: Vec<CartLine>,
    /// Sum of `price * quantity` over the items.
    pub total: Decimal,
    /// Lifecycle status; orders start `pending`.
    pub status: OrderStatus,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Build an order from the current cart for `user_id`.
    ///
    /// The caller is responsible for rejecting an empty cart first; this
    /// constructor only snapshots.
    #[must_use]
    pub fn from_cart(user_id: UserId, cart: &Cart) -> Self {
        Self {
            id: OrderId::generate(),
            user_id,
            items: cart.lines().to_vec(),
            total: cart.total(),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
