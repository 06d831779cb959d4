//! Domain layer for the authorization check.

pub mod credentials;
pub mod decision;
pub mod service;
