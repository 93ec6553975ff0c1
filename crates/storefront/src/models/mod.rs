//! Domain models for the storefront.
//!
//! These are the record types persisted in the store's collections, plus
//! the session-held types (`CurrentUser`, session keys).

pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use order::Order;
pub use product::{NewProduct, Product};
pub use session::{CurrentUser, session_keys};
pub use user::User;
