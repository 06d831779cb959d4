//! Public API trait for the users module.
//!
//! The authorization check consumes this trait; the Postgres-backed
//! implementation lives in the `users` crate.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::User;

/// Read-only credential store.
///
/// Every call issues exactly one round trip to the backing store and never
/// mutates a user record.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by username.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no user has this username
    /// - `Cancelled` / `DeadlineExceeded` if the call was cut short
    /// - `Internal` for any other backend failure
    async fn get_user(&self, username: &str) -> Result<User, StoreError>;

    /// Verify that `password` equals the stored password for `username`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no user has this username
    /// - `Unauthenticated` if the password does not match
    /// - `Cancelled` / `DeadlineExceeded` if the call was cut short
    /// - `Internal` for any other backend failure
    async fn check_user_password(&self, username: &str, password: &str)
    -> Result<(), StoreError>;
}
