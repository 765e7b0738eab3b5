//! Generic interpreter for declarative field rule tables.
//!
//! A rule table is a static slice of [`FieldRule`]s. Every rule is checked
//! independently and all violations are collected before the document is
//! rejected.

use serde_json::{Map, Value};
use validator::{ValidationError, ValidationErrors};

/// JSON type a field must have when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Array,
    Object,
}

impl FieldType {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::Array => value.is_array(),
            FieldType::Object => value.is_object(),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            FieldType::String => "a string",
            FieldType::Number => "a number",
            FieldType::Array => "an array",
            FieldType::Object => "an object",
        }
    }
}

/// Extra constraint checked once the type matches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    None,
    /// String must contain something other than whitespace.
    NonEmpty,
    /// Number must be greater than or equal to the bound.
    Min(f64),
    /// Every array element must be one of the allowed strings.
    EachOneOf(&'static [&'static str]),
    /// Every array element must be a non-empty string.
    EachNonEmpty,
}

/// One row of a rule table.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Dotted path into the document, e.g. `budget.min`.
    pub path: &'static str,
    pub required: bool,
    pub kind: FieldType,
    pub constraint: Constraint,
}

impl FieldRule {
    pub const fn required(path: &'static str, kind: FieldType, constraint: Constraint) -> Self {
        Self { path, required: true, kind, constraint }
    }

    pub const fn optional(path: &'static str, kind: FieldType, constraint: Constraint) -> Self {
        Self { path, required: false, kind, constraint }
    }

    fn check(&self, doc: &Map<String, Value>) -> Result<(), ValidationError> {
        let Some(value) = lookup(doc, self.path) else {
            if self.required {
                return Err(violation("required", format!("{} is required", self.path)));
            }
            return Ok(());
        };

        if !self.kind.accepts(value) {
            return Err(violation(
                "type",
                format!("{} must be {}", self.path, self.kind.describe()),
            ));
        }

        match self.constraint {
            Constraint::None => Ok(()),
            Constraint::NonEmpty => match value.as_str() {
                Some(s) if !s.trim().is_empty() => Ok(()),
                _ => Err(violation("empty", format!("{} must not be empty", self.path))),
            },
            Constraint::Min(bound) => match value.as_f64() {
                Some(n) if n >= bound => Ok(()),
                _ => Err(violation(
                    "range",
                    format!("{} must be greater than or equal to {}", self.path, bound),
                )),
            },
            Constraint::EachOneOf(allowed) => {
                let items = value.as_array().map(Vec::as_slice).unwrap_or_default();
                let ok = items
                    .iter()
                    .all(|item| item.as_str().is_some_and(|s| allowed.contains(&s)));
                if ok {
                    Ok(())
                } else {
                    Err(violation(
                        "not_allowed",
                        format!("{} may only contain: {}", self.path, allowed.join(", ")),
                    ))
                }
            }
            Constraint::EachNonEmpty => {
                let items = value.as_array().map(Vec::as_slice).unwrap_or_default();
                let ok = items
                    .iter()
                    .all(|item| item.as_str().is_some_and(|s| !s.trim().is_empty()));
                if ok {
                    Ok(())
                } else {
                    Err(violation(
                        "empty",
                        format!("{} must only contain non-empty strings", self.path),
                    ))
                }
            }
        }
    }
}

/// Check `doc` against every rule in `rules`, aggregating all violations.
pub fn validate(doc: &Map<String, Value>, rules: &[FieldRule]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for rule in rules {
        if let Err(e) = rule.check(doc) {
            errors.add(rule.path, e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Resolve a dotted path. A missing segment or a non-object parent means absent.
fn lookup<'a>(doc: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = doc.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn violation(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}
