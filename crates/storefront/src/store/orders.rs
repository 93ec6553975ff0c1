//! Order repository over the record store.

use tracing::instrument;

use shophub_core::{OrderId, OrderStatus, UserId};

use super::{RepositoryError, Store, collections};
use crate::models::Order;

/// Repository for the `orders` collection.
pub struct OrderRepository<'a> {
    store: &'a Store,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All orders, in stored (placement) order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read.
    pub fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        self.store.get_collection(collections::ORDERS)
    }

    /// The `limit` most recent orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read.
    pub fn list_recent(&self, limit: usize) -> Result<Vec<Order>, RepositoryError> {
        let mut orders = self.list()?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders.truncate(limit);
        Ok(orders)
    }

    /// All orders placed by `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read.
    pub fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        let mut orders = self.list()?;
        orders.retain(|o| &o.user_id == user_id);
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Number of orders placed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read.
    pub fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.list()?.len())
    }

    /// Append a placed order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be updated.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub fn append(&self, order: Order) -> Result<(), RepositoryError> {
        self.store
            .update_collection(collections::ORDERS, move |orders: &mut Vec<Order>| {
                orders.push(order);
                Ok(())
            })
    }

    /// Move an order to a new status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist, or
    /// `RepositoryError::Conflict` if the transition is not allowed (only
    /// pending orders may move, to completed or cancelled).
    #[instrument(skip(self))]
    pub fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        self.store
            .update_collection(collections::ORDERS, |orders: &mut Vec<Order>| {
                let order = orders
                    .iter_mut()
                    .find(|o| &o.id == id)
                    .ok_or(RepositoryError::NotFound)?;

                if !order.status.can_transition_to(status) {
                    return Err(RepositoryError::Conflict(format!(
                        "order {} cannot move from {} to {status}",
                        order.id, order.status
                    )));
                }

                order.status = status;
                Ok(order.clone())
            })
    }
}
