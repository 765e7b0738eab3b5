//! Declarative field validation.
//!
//! # Data Flow
//! ```text
//! JSON object body
//!     → rules.rs (generic interpreter over a static rule table)
//!     → schemas.rs (address / preferences / wishlist tables)
//!     → Ok(()) or every violation at once
//! ```

pub mod rules;
pub mod schemas;

pub use rules::{validate, Constraint, FieldRule, FieldType};
pub use schemas::{ADDRESS_RULES, PREFERENCE_RULES, WISHLIST_RULES};

use serde_json::{Map, Value};

use crate::error::AppError;

/// Validate a raw JSON body against a rule table, returning the object on success.
pub fn validate_document(body: Value, rules: &[FieldRule]) -> Result<Map<String, Value>, AppError> {
    let Value::Object(doc) = body else {
        return Err(AppError::malformed("Request body must be a JSON object"));
    };
    validate(&doc, rules).map_err(AppError::invalid_fields)?;
    Ok(doc)
}
