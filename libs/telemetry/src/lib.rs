//! Telemetry bootstrap for the tempo services.
//!
//! - [`init()`] installs the process-wide tracing subscriber and, when an OTLP
//!   endpoint is configured, an OpenTelemetry tracer provider exporting spans
//!   over gRPC.
//! - [`TelemetryGuard`] is the explicit handle to that process-scoped state;
//!   call [`TelemetryGuard::shutdown`] once during graceful shutdown.
//! - [`propagation`] continues W3C trace contexts carried in HTTP/gRPC headers.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod init;
pub mod propagation;

pub use config::{LogFormat, TelemetryConfig};
pub use init::{TelemetryError, TelemetryGuard, init};
pub use propagation::{
    HeaderExtractor, extract_context, make_span_with_context, record_response,
    set_parent_from_headers,
};
