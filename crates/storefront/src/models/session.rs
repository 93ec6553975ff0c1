//! Session-held types and keys.
//!
//! The cookie session is the per-browser state: the cart and the logged-in
//! user with their mock token. These are the `token` / `user` session
//! markers; the record store holds only the shared collections.

use serde::{Deserialize, Serialize};

use shophub_core::{Email, Role, UserId};

use super::User;

/// Session keys.
pub mod session_keys {
    /// The session cart ([`shophub_core::Cart`]).
    pub const CART: &str = "cart";
    /// The logged-in user ([`super::CurrentUser`]).
    pub const CURRENT_USER: &str = "user";
    /// The mock auth token (base64 claims string).
    pub const TOKEN: &str = "token";
}

/// The logged-in user as held in the session and returned by `/auth/me`.
///
/// A projection of [`User`] without the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: Email,
    pub role: Role,
}

impl CurrentUser {
    /// Whether this user may access the admin surface.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}
