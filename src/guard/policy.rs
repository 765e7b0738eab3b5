//! Redirect-or-continue decision for an inbound navigation.

use axum::http::{header::COOKIE, HeaderMap};

use super::matcher::{AnyMatcher, Matcher};
use crate::config::GuardConfig;

/// What the guard wants done with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Continue,
    Redirect(String),
}

/// Presence-only auth gate for protected path prefixes.
///
/// The token is never inspected beyond being non-empty; verifying it is the
/// business handler's concern.
#[derive(Debug)]
pub struct RouteGuard {
    protected: AnyMatcher,
    fallback_path: String,
    cookie_name: String,
}

impl RouteGuard {
    pub fn new(protected: AnyMatcher, fallback_path: impl Into<String>, cookie_name: impl Into<String>) -> Self {
        Self {
            protected,
            fallback_path: fallback_path.into(),
            cookie_name: cookie_name.into(),
        }
    }

    pub fn from_config(config: &GuardConfig) -> Self {
        Self::new(
            AnyMatcher::compile(&config.protected_paths),
            config.fallback_path.clone(),
            config.cookie_name.clone(),
        )
    }

    pub fn is_protected(&self, path: &str) -> bool {
        self.protected.matches(path)
    }

    pub fn decide(&self, path: &str, token: Option<&str>) -> GuardDecision {
        let has_token = token.is_some_and(|t| !t.trim().is_empty());
        if self.is_protected(path) && !has_token {
            GuardDecision::Redirect(self.fallback_path.clone())
        } else {
            GuardDecision::Continue
        }
    }

    /// Read the auth cookie from every `Cookie` header on the request.
    ///
    /// Headers are decoded lossily: a non-ASCII value in some other cookie
    /// must not hide the token.
    pub fn token_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .find_map(|v| cookie_value(&String::from_utf8_lossy(v.as_bytes()), &self.cookie_name))
    }

    pub fn fallback_path(&self) -> &str {
        &self.fallback_path
    }
}

fn cookie_value(raw: &str, name: &str) -> Option<String> {
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
}
