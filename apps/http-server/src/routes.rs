//! `GET /test`: echo request headers, then stall for a random while.

use std::collections::BTreeMap;
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use http::{HeaderMap, StatusCode};
use rand::Rng;
use tempo_telemetry::{make_span_with_context, record_response};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

const LATENCY_STEP: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy)]
struct EchoState {
    latency_steps: u32,
}

#[must_use]
pub fn router(config: &ServerConfig) -> Router {
    Router::new()
        .route("/test", get(echo_headers))
        .with_state(EchoState {
            latency_steps: config.latency_steps,
        })
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            config.write_timeout,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_context)
                .on_response(record_response),
        )
}

async fn echo_headers(State(state): State<EchoState>, headers: HeaderMap) -> String {
    let body = render_headers(&headers);

    let delay = simulated_latency(state.latency_steps);
    tracing::debug!(delay_ms = delay.as_millis(), "simulating latency");
    tokio::time::sleep(delay).await;

    body
}

/// One `name: value` line per header value, names in lexical order and
/// repeated values in arrival order.
#[must_use]
pub fn render_headers(headers: &HeaderMap) -> String {
    let mut sorted = BTreeMap::new();
    for name in headers.keys() {
        sorted.insert(name.as_str(), headers.get_all(name));
    }

    let mut out = String::new();
    for (name, values) in sorted {
        for value in values {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(&String::from_utf8_lossy(value.as_bytes()));
            out.push('\n');
        }
    }
    out
}

fn simulated_latency(steps: u32) -> Duration {
    if steps == 0 {
        return Duration::ZERO;
    }
    LATENCY_STEP * rand::rng().random_range(0..steps)
}
