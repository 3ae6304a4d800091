//! Metrics collection and exposition.
//!
//! # Metrics
//! - `ridehail_requests_total` (counter): requests by method, path, status
//! - `ridehail_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - The path label is the matched route template, not the raw URI, so
//!   `/rides/{id}` stays one series no matter how many rides exist
//! - Histogram buckets tuned for typical web latencies
//! - Exposition is a separate Prometheus scrape listener, kept off the
//!   API port

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "ridehail_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "ridehail_request_duration_seconds";

const DURATION_BUCKETS: &[f64] = &[
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Install the Prometheus recorder and its scrape listener.
///
/// Failure to bind is logged and otherwise ignored: the service keeps
/// answering requests, metric updates just go nowhere.
pub fn init_metrics(address: SocketAddr) {
    let builder = PrometheusBuilder::new()
        .with_http_listener(address)
        .set_buckets_for_metric(Matcher::Full(REQUEST_DURATION_SECONDS.to_string()), DURATION_BUCKETS);

    let builder = match builder {
        Ok(builder) => builder,
        Err(err) => {
            tracing::error!(error = %err, "Invalid metrics histogram buckets");
            return;
        }
    };

    match builder.install() {
        Ok(()) => {
            describe_counter!(REQUESTS_TOTAL, "Total HTTP requests served");
            describe_histogram!(REQUEST_DURATION_SECONDS, Unit::Seconds, "HTTP request latency");
            tracing::info!(address = %address, "Metrics exporter listening");
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to install metrics exporter");
        }
    }
}

/// Middleware recording one observation per handled request.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());
    let method = req.method().clone();

    let response = next.run(req).await;

    let labels = [
        ("method", method.to_string()),
        ("path", path),
        ("status", response.status().as_u16().to_string()),
    ];
    counter!(REQUESTS_TOTAL, &labels).increment(1);
    histogram!(REQUEST_DURATION_SECONDS, &labels).record(start.elapsed().as_secs_f64());

    response
}
