//! Users SDK
//!
//! This crate provides the public contract of the users module:
//!
//! - [`UserStore`] - credential store trait consumed by the authorization check
//! - [`User`] - user identity model
//! - [`StoreError`] - error types
//!
//! ## Usage
//!
//! ```ignore
//! use users_sdk::UserStore;
//!
//! store.check_user_password("alice", "secret").await?;
//! let user = store.get_user("alice").await?;
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::UserStore;
pub use error::StoreError;
pub use models::User;
