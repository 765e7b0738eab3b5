//! Realty gateway library.
//!
//! Request pipeline and edge routing guard for a real-estate listing service.

pub mod config;
pub mod error;
pub mod geocoding;
pub mod guard;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pipeline;
pub mod security;
pub mod validation;

pub use config::schema::GatewayConfig;
pub use error::AppError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use pipeline::{Outcome, Pipeline, RequestContext, Stage};
