//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, JSON extraction)
//!     → api handlers (crate::api)
//!     → response.rs / error.rs (success and error bodies)
//!     → Send to client
//! ```

pub mod error;
pub mod request;
pub mod response;
pub mod server;

pub use error::ApiError;
pub use request::{AppJson, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
