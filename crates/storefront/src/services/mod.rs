//! Business logic services.
//!
//! Services sit between the route handlers and the repositories: they own
//! the multi-collection sequences (registration, checkout) so the handlers
//! stay thin.

pub mod auth;
pub mod checkout;

pub use auth::{AuthError, AuthService};
pub use checkout::{CheckoutError, CheckoutService};
