//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handling produces:
//!     → logging.rs (structured log events, request-id correlated)
//!     → metrics.rs (request counter, latency histogram)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through all log events via the trace layer
//! - Metrics are cheap (atomic increments behind the recorder)
//! - The scrape listener lives on its own port, away from the API

pub mod logging;
pub mod metrics;
