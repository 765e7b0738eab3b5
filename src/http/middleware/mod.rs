//! Request middleware.

pub mod metrics;
pub mod route_guard;

pub use self::metrics::track_metrics;
pub use route_guard::route_guard_middleware;
