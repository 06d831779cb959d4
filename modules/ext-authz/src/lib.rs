//! Envoy External Authorization
//!
//! Implements the `envoy.service.auth.v3.Authorization` callback: a reverse
//! proxy forwards each request's headers, this crate decodes an HTTP Basic
//! credential, verifies it against a [`users_sdk::UserStore`] and answers
//! with an allow/deny decision.
//!
//! ## Layers
//!
//! - `domain` - credential parsing, the [`Decision`] model and the
//!   [`Authorizer`] check itself; no transport types
//! - `api::grpc` - tonic service mapping decisions to Envoy `CheckResponse`s
//!
//! Every failure is converted to a 401 denial inside this crate; nothing
//! crosses the proxy boundary as a gRPC error.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod config;
pub mod domain;

pub use api::grpc::ExtAuthzService;
pub use config::AuthConfig;
pub use domain::decision::{Decision, DenyCause, HeaderMutation, MergePolicy};
pub use domain::service::Authorizer;
