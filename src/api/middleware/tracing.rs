//! Request/response tracing for the redirect chain.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates the tracing layer wrapped around the whole router.
///
/// Every request gets an `INFO` span with method, URI and version; the
/// response is logged with its status and latency. Redirects show up as
/// `308`, fall-through responses with the status of the terminal handler.
///
/// ```text
/// INFO request{method=GET uri=/urlshort version=HTTP/1.1}: finished processing request latency=0 ms status=308
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
