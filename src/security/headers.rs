//! Security response headers.
//!
//! Added to every response the guard lets through, whatever the handler set.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Lowercase header names with their literal values.
pub const SECURITY_HEADERS: [(&str, &str); 3] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
];

/// Insert the fixed security headers, replacing any existing values.
pub fn apply_security_headers(headers: &mut HeaderMap) {
    for (name, value) in SECURITY_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
}
