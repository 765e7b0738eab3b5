//! Request-level error taxonomy and the centralized error reporter.
//!
//! Stages and handlers never build error responses themselves. They return an
//! [`AppError`] and the reporter turns it into exactly one response.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed client input.
    #[error("{message}")]
    Validation {
        message: String,
        violations: ValidationErrors,
    },

    /// A request body refused before it could be read, keeping the
    /// rejection's own status (413, 415).
    #[error("{message}")]
    Payload { status: StatusCode, message: String },

    /// A lookup produced no usable result.
    #[error("{0}")]
    NotFound(String),

    /// An external dependency failed or answered with an unexpected shape.
    #[error("{0}")]
    Upstream(String),
}

impl AppError {
    /// Build a validation error from aggregated field violations.
    pub fn invalid_fields(violations: ValidationErrors) -> Self {
        let mut fields: Vec<String> = violations
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();

        Self::Validation {
            message: format!("Invalid or missing fields: {}", fields.join(", ")),
            violations,
        }
    }

    /// Validation error that is not tied to a single field (e.g. a non-object body).
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            violations: ValidationErrors::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Payload { status, .. } => *status,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Stable name of the error class, used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation { .. } | AppError::Payload { .. } => "ValidationError",
            AppError::NotFound(_) => "NotFoundError",
            AppError::Upstream(_) => "UpstreamError",
        }
    }

    fn field_messages(&self) -> Option<BTreeMap<String, Vec<String>>> {
        let AppError::Validation { violations, .. } = self else {
            return None;
        };
        if violations.is_empty() {
            return None;
        }

        let mut out = BTreeMap::new();
        for (field, errors) in violations.field_errors() {
            let messages = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            out.insert(field.to_string(), messages);
        }
        Some(out)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = json!({
            "success": false,
            "error": self.kind(),
            "message": self.to_string(),
        });
        if let Some(fields) = self.field_messages() {
            body["errors"] = json!(fields);
        }

        (status, Json(body)).into_response()
    }
}

/// Centralized error reporter.
///
/// Every failure that leaves the pipeline or a handler goes through here so that
/// logging, metrics and the response shape stay in one place.
pub fn report(request_id: &str, err: AppError) -> Response {
    match &err {
        AppError::Upstream(_) => {
            tracing::error!(request_id = %request_id, kind = err.kind(), error = %err, "Request failed");
        }
        _ => {
            tracing::warn!(request_id = %request_id, kind = err.kind(), error = %err, "Request rejected");
        }
    }
    metrics::record_failure(err.kind());

    err.into_response()
}
