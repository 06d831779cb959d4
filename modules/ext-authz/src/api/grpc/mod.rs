//! Envoy `Authorization` gRPC adapter.

mod mapper;
mod server;

pub use mapper::{request_headers, to_check_response};
pub use server::ExtAuthzService;
