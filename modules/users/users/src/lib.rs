//! Users Module
//!
//! Persistence-backed lookup of user identity and password verification.
//!
//! ## Architecture
//!
//! ### Contract Layer (`users-sdk`)
//! - `UserStore` trait, `User` model, `StoreError`
//!
//! ### Infrastructure Layer (`users::infra`)
//! - `storage/entity.rs` - `SeaORM` entity for the `users` table
//! - `storage/sea_orm_repo.rs` - `UserStore` implementation
//! - `storage/migrations/` - schema and seed migrations
//! - `storage/db.rs` - pool construction and startup upgrade
//!
//! The store is read-only: users are created by migrations or by external
//! administration, never through this crate's public API.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// === PUBLIC API (from SDK) ===
pub use users_sdk::{StoreError, User, UserStore};

pub mod config;
pub mod infra;

pub use config::DatabaseConfig;
pub use infra::storage::db::{DbInitError, connect, upgrade_db};
pub use infra::storage::migrations::Migrator;
pub use infra::storage::sea_orm_repo::SeaOrmUserStore;
