//! Checkout service.
//!
//! Turns the session cart into a persisted order. The sequence touches two
//! collections (stock decrement, then the order append) without a
//! transaction; the store is single-writer so interleaving is not a
//! concern, and a crash between the steps is an accepted demo tradeoff.

use thiserror::Error;
use tracing::instrument;

use shophub_core::Cart;

use crate::models::{CurrentUser, Order};
use crate::store::{OrderRepository, ProductRepository, RepositoryError, Store};

/// Errors that reject a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No user in the session.
    #[error("checkout requires a logged-in user")]
    NotAuthenticated,

    /// Nothing in the cart.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// Underlying store failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Checkout service.
pub struct CheckoutService<'a> {
    products: ProductRepository<'a>,
    orders: OrderRepository<'a>,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self {
            products: ProductRepository::new(store),
            orders: OrderRepository::new(store),
        }
    }

    /// Place an order from the cart, then empty it.
    ///
    /// Snapshots the cart lines into a new pending order, decrements stock
    /// for each purchased product (floored at zero), appends the order, and
    /// clears the cart. The cart is only cleared on success.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NotAuthenticated` without a user,
    /// `CheckoutError::EmptyCart` for an empty cart, and
    /// `CheckoutError::Repository` if the store fails.
    #[instrument(skip(self, user, cart), fields(user_id))]
    pub fn place_order(
        &self,
        user: Option<&CurrentUser>,
        cart: &mut Cart,
    ) -> Result<Order, CheckoutError> {
        let user = user.ok_or(CheckoutError::NotAuthenticated)?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        tracing::Span::current().record("user_id", user.id.as_str());

        let order = Order::from_cart(user.id.clone(), cart);

        let purchases: Vec<_> = order
            .items
            .iter()
            .map(|line| (line.product_id.clone(), line.quantity))
            .collect();
        self.products.decrement_stock(&purchases)?;

        self.orders.append(order.clone())?;
        cart.clear();

        tracing::info!(order_id = %order.id, total = %order.total, "Order placed");
        Ok(order)
    }
}
