//! Domain models for the users module.

use serde::{Deserialize, Serialize};

/// A user identity as seen by consumers of the store.
///
/// The stored password is intentionally not part of this model: it is only
/// ever read by [`crate::UserStore::check_user_password`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    /// Unique, case-sensitive login name.
    pub username: String,
}
