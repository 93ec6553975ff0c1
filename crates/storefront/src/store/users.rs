//! User repository over the record store.

use chrono::Utc;
use tracing::instrument;

use shophub_core::{Email, Role, UserId};

use super::{RepositoryError, Store, collections};
use crate::models::User;

/// Repository for the `users` collection.
pub struct UserRepository<'a> {
    store: &'a Store,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Look up a user by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read.
    pub fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let users: Vec<User> = self.store.get_collection(collections::USERS)?;
        Ok(users.into_iter().find(|u| &u.email == email))
    }

    /// Number of registered users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read.
    pub fn count(&self) -> Result<usize, RepositoryError> {
        let users: Vec<User> = self.store.get_collection(collections::USERS)?;
        Ok(users.len())
    }

    /// Register a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already taken.
    #[instrument(skip(self, password), fields(email = %email))]
    pub fn create(
        &self,
        email: Email,
        password: String,
        role: Role,
    ) -> Result<User, RepositoryError> {
        let user = User {
            id: UserId::generate(),
            email,
            password,
            role,
            created_at: Utc::now(),
        };

        let created = user.clone();
        self.store
            .update_collection(collections::USERS, move |users: &mut Vec<User>| {
                if users.iter().any(|u| u.email == user.email) {
                    return Err(RepositoryError::Conflict(format!(
                        "email {} is already registered",
                        user.email
                    )));
                }
                users.push(user);
                Ok(())
            })?;

        Ok(created)
    }
}
