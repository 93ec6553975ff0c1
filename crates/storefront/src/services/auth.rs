//! Mock authentication service.
//!
//! Registration and login against the `users` collection. Passwords are
//! compared in the clear and the issued token is base64-encoded JSON
//! claims; this is a demo credential flow, not a security boundary.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use shophub_core::{Email, EmailError, Role};

use crate::models::{CurrentUser, User};
use crate::store::{RepositoryError, Store, UserRepository};

/// How long an issued token claims to be valid.
const TOKEN_TTL_HOURS: i64 = 24;

/// Errors from registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password didn't match a registered user.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The email is already registered.
    #[error("email already registered")]
    EmailTaken,

    /// The email failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The password is empty.
    #[error("password cannot be empty")]
    EmptyPassword,

    /// Underlying store failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Claims carried inside the mock token.
#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    user_id: String,
    email: String,
    role: Role,
    /// Expiry as a Unix millisecond timestamp.
    exp: i64,
}

/// A successful registration or login: the user plus their token.
#[derive(Debug)]
pub struct AuthOutcome {
    pub user: CurrentUser,
    pub token: String,
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self {
            users: UserRepository::new(store),
        }
    }

    /// Register a new customer account and log them in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid,
    /// `AuthError::EmptyPassword` if no password was given, or
    /// `AuthError::EmailTaken` if the email is already registered.
    #[instrument(skip(self, password))]
    pub fn register(&self, email: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        let email = Email::parse(email)?;
        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }

        let user = self
            .users
            .create(email, password.to_owned(), Role::Customer)
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        Ok(outcome(&user))
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown or
    /// the password doesn't match.
    #[instrument(skip(self, password))]
    pub fn login(&self, email: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .users
            .find_by_email(&email)?
            .ok_or(AuthError::InvalidCredentials)?;

        // Plaintext comparison; the store holds demo passwords only.
        if user.password != password {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(outcome(&user))
    }
}

fn outcome(user: &User) -> AuthOutcome {
    AuthOutcome {
        user: CurrentUser::from(user),
        token: issue_token(user),
    }
}

/// Encode the mock token: base64 over JSON claims with a 24 hour expiry.
fn issue_token(user: &User) -> String {
    let claims = TokenClaims {
        user_id: user.id.to_string(),
        email: user.email.to_string(),
        role: user.role,
        exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp_millis(),
    };

    // Serializing a struct of plain fields cannot fail.
    let json = serde_json::to_string(&claims).unwrap_or_default();
    BASE64.encode(json)
}
