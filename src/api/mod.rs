//! Public API subsystem.
//!
//! # Data Flow
//! ```text
//! Router (path + method match)
//!     │
//!     ├── /users, /auth/login, /drivers/{id}/status ──▶ users handlers
//!     ├── /rides, /rides/{id} ─────────────────────────▶ rides handlers
//!     └── /health ─────────────────────────────────────▶ get_status
//!                         │
//!                         ▼
//!              AppState.store (Arc<dyn Store>)
//! ```
//!
//! # Design Decisions
//! - Handlers return `Result<_, ApiError>`; the error type owns every
//!   status and body mapping, so no handler writes a raw response
//! - Ids arrive as path strings and are parsed in the handler, keeping
//!   malformed ids inside the JSON error contract

pub mod rides;
pub mod users;

use axum::routing::{get, patch, post};
use axum::{Json, Router};

use crate::http::response::SystemStatus;
use crate::http::server::AppState;

/// Assemble the route table. Middleware is layered on by the server.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(get_status))
        .route("/users", post(users::create_user))
        .route("/auth/login", post(users::login))
        .route("/drivers/{id}/status", patch(users::set_driver_availability))
        .route("/rides", get(rides::list_rides).post(rides::create_ride))
        .route(
            "/rides/{id}",
            patch(rides::update_ride_status)
                .put(rides::replace_ride)
                .delete(rides::delete_ride),
        )
        .with_state(state)
}

/// GET /health
pub async fn get_status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
    })
}
