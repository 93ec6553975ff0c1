//! User record type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shophub_core::{Email, Role, UserId};

/// A registered user.
///
/// The password is stored in the clear: authentication here is a demo
/// mock, not a security boundary. Never serialize this record into a
/// response; use [`CurrentUser`](super::CurrentUser) instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Email address, unique across the users collection.
    pub email: Email,
    /// Plaintext password (demo only).
    pub password: String,
    /// Customer or admin.
    pub role: Role,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
