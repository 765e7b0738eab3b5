//! Rule tables for the documents the service accepts.

use super::rules::{Constraint, FieldRule, FieldType};

/// Listing types a user can be interested in.
pub const INTEREST_KINDS: &[&str] = &["buy", "rent", "shortlet"];

/// Address components the geocoding stage needs.
pub const ADDRESS_RULES: &[FieldRule] = &[
    FieldRule::required("streetAddress", FieldType::String, Constraint::NonEmpty),
    FieldRule::required("city", FieldType::String, Constraint::NonEmpty),
    FieldRule::required("state", FieldType::String, Constraint::NonEmpty),
];

pub const PREFERENCE_RULES: &[FieldRule] = &[
    FieldRule::optional("interestedIn", FieldType::Array, Constraint::EachOneOf(INTEREST_KINDS)),
    FieldRule::optional("budget", FieldType::Object, Constraint::None),
    FieldRule::optional("budget.min", FieldType::Number, Constraint::Min(0.0)),
    FieldRule::optional("budget.max", FieldType::Number, Constraint::Min(0.0)),
    FieldRule::optional("preferredLocations", FieldType::Array, Constraint::None),
    FieldRule::optional("propertyPreferences", FieldType::Object, Constraint::None),
    FieldRule::optional("propertyPreferences.types", FieldType::Array, Constraint::None),
];

/// A wishlist references one agent and any number of properties by id.
pub const WISHLIST_RULES: &[FieldRule] = &[
    FieldRule::required("agent", FieldType::String, Constraint::NonEmpty),
    FieldRule::optional("properties", FieldType::Array, Constraint::EachNonEmpty),
];
