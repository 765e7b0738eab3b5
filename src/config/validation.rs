//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, URLs and paths
//! - Reject a guard that would redirect into itself
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ConfigViolation>>

use std::net::SocketAddr;

use tracing::level_filters::LevelFilter;
use url::Url;

use crate::config::schema::GatewayConfig;
use crate::guard::RouteGuard;

/// One semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigViolation {
    pub field: &'static str,
    pub message: String,
}

impl ConfigViolation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ConfigViolation>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ConfigViolation::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ConfigViolation::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.security.max_body_size == 0 {
        errors.push(ConfigViolation::new("security.max_body_size", "must be greater than 0"));
    }

    let guard = &config.guard;
    for path in &guard.protected_paths {
        if !path.starts_with('/') {
            errors.push(ConfigViolation::new(
                "guard.protected_paths",
                format!("'{}' must start with '/'", path),
            ));
        }
    }

    if !guard.fallback_path.starts_with('/') {
        errors.push(ConfigViolation::new("guard.fallback_path", "must start with '/'"));
    } else if RouteGuard::from_config(guard).is_protected(&guard.fallback_path) {
        errors.push(ConfigViolation::new(
            "guard.fallback_path",
            format!("'{}' is itself protected and would redirect forever", guard.fallback_path),
        ));
    }

    let cookie = &guard.cookie_name;
    if cookie.is_empty() || cookie.chars().any(|c| c.is_whitespace() || c == ';' || c == '=') {
        errors.push(ConfigViolation::new("guard.cookie_name", "must be a non-empty cookie name"));
    }

    match Url::parse(&config.geocoding.endpoint) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ConfigViolation::new(
            "geocoding.endpoint",
            format!("'{}' is not an http(s) URL", config.geocoding.endpoint),
        )),
    }

    let observability = &config.observability;
    if observability.log_level.parse::<LevelFilter>().is_err() {
        errors.push(ConfigViolation::new(
            "observability.log_level",
            format!("unknown level '{}'", observability.log_level),
        ));
    }
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ConfigViolation::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
