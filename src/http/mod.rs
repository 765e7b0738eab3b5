//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (request id, trace span, metrics)
//!     → middleware/route_guard.rs (redirect or continue + security headers)
//!     → handlers.rs
//!         → pipeline (geocode stage) or rule-table validation
//!         → terminal handler response / centralized error reporter
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
