//! Per-request data bag threaded through the pipeline.

use axum::http::Extensions;
use serde_json::{Map, Value};

use crate::error::AppError;

/// Mutable per-request context.
///
/// Body fields come from the client. Derived fields are added by stages and
/// are stored by type, so a downstream consumer asking for `Coordinates`
/// gets exactly the type the producing stage inserted.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    body: Map<String, Value>,
    derived: Extensions,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>, body: Map<String, Value>) -> Self {
        Self {
            request_id: request_id.into(),
            body,
            derived: Extensions::new(),
        }
    }

    /// Build a context from an arbitrary JSON body. Only objects are accepted.
    pub fn from_json(request_id: impl Into<String>, body: Value) -> Result<Self, AppError> {
        match body {
            Value::Object(map) => Ok(Self::new(request_id, map)),
            _ => Err(AppError::malformed("Request body must be a JSON object")),
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    /// String body field, if present and a string.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.body.get(name).and_then(Value::as_str)
    }

    /// Attach a derived field. Replaces any earlier value of the same type.
    pub fn attach<T: Clone + Send + Sync + 'static>(&mut self, value: T) {
        self.derived.insert(value);
    }

    pub fn derived<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.derived.get::<T>()
    }

    pub fn into_body(self) -> Map<String, Value> {
        self.body
    }
}
