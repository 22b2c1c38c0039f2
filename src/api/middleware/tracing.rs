//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates the request tracing layer.
///
/// Every request gets an `INFO` span with method, URI and version. The
/// response is logged at `INFO` with status and latency in milliseconds.
/// 5xx responses are additionally reported at `WARN`; their cause is
/// already in the error log, written where the fault was converted.
///
/// ```text
/// INFO request{method=POST uri=/generate version=HTTP/1.1}: finished processing request latency=3 ms status=201
/// INFO request{method=GET uri=/get/1f9a2b version=HTTP/1.1}: finished processing request latency=1 ms status=410
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::WARN)
                .latency_unit(LatencyUnit::Millis),
        )
}
