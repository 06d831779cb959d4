//! W3C trace context continuation across HTTP and gRPC hops.

use std::time::Duration;

use opentelemetry::propagation::{Extractor, TextMapCompositePropagator};
use opentelemetry::{Context, global};
use opentelemetry_sdk::propagation::{BaggagePropagator, TraceContextPropagator};
use tracing::field::Empty;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Read-only carrier over an `http::HeaderMap`. Values that are not visible
/// ASCII are skipped.
pub struct HeaderExtractor<'a>(pub &'a http::HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(http::HeaderName::as_str).collect()
    }
}

/// Register `traceparent`/`tracestate` and `baggage` as the global propagator.
pub(crate) fn install_propagator() {
    global::set_text_map_propagator(TextMapCompositePropagator::new(vec![
        Box::new(TraceContextPropagator::new()),
        Box::new(BaggagePropagator::new()),
    ]));
}

/// Extract the remote context carried by `headers`.
///
/// Returns an empty context when no valid `traceparent` is present.
#[must_use]
pub fn extract_context(headers: &http::HeaderMap) -> Context {
    global::get_text_map_propagator(|propagator| propagator.extract(&HeaderExtractor(headers)))
}

/// Parent `span` to the trace context carried in `headers`, if any.
pub fn set_parent_from_headers(span: &tracing::Span, headers: &http::HeaderMap) {
    let _ = span.set_parent(extract_context(headers));
}

/// Server span for an inbound request, parented to the caller's trace when
/// one is propagated. `status` and `latency_ms` are filled by
/// [`record_response`].
#[must_use]
pub fn make_span_with_context<B>(request: &http::Request<B>) -> tracing::Span {
    let span = tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri().path(),
        version = ?request.version(),
        status = Empty,
        latency_ms = Empty,
        "http.method" = %request.method(),
        "http.target" = %request.uri().path(),
    );
    set_parent_from_headers(&span, request.headers());
    span
}

/// `on_response` callback pairing with [`make_span_with_context`].
pub fn record_response<B>(response: &http::Response<B>, latency: Duration, span: &tracing::Span) {
    span.record("status", response.status().as_u16());
    span.record("latency_ms", latency.as_millis());
}
