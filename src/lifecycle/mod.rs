//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging/metrics → Seed → Serve
//!
//! Shutdown (shutdown.rs):
//!     Trigger or signal → Stop accepting → Drain in-flight → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → resolve the shutdown future
//! ```
//!
//! # Design Decisions
//! - Shutdown can come from an OS signal or a programmatic trigger;
//!   the server waits on whichever fires first
//! - In-flight requests drain before the listener closes

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
