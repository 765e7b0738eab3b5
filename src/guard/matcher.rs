//! Path matching for protected routes.
//!
//! # Responsibilities
//! - Match a path prefix (case-sensitive, plain `starts_with`)
//! - Match everything strictly below a base path (`/base/*`)
//! - Combine patterns with OR semantics
//!
//! # Design Decisions
//! - No regex; patterns are checked in order, first hit wins
//! - Compiled once from config, immutable afterwards

/// Trait for matching a request path.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this pattern.
    fn matches(&self, path: &str) -> bool;
}

/// Matches any path that starts with the prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }
}

/// Matches paths strictly below a base, written `/base/*` in config.
#[derive(Debug, Clone)]
pub struct SubtreeMatcher {
    /// Base with a trailing slash, e.g. `/real-estate/add-property/`.
    base: String,
}

impl SubtreeMatcher {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self { base }
    }
}

impl Matcher for SubtreeMatcher {
    fn matches(&self, path: &str) -> bool {
        path.len() > self.base.len() && path.starts_with(&self.base)
    }
}

/// Matches when any inner matcher does.
#[derive(Debug, Default)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    /// Compile config patterns. A pattern ending in `/*` becomes a subtree
    /// matcher, anything else a prefix matcher.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Self {
        let matchers = patterns
            .iter()
            .map(|p| compile_pattern(p.as_ref()))
            .collect();
        Self { matchers }
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Matcher for AnyMatcher {
    fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }
}

fn compile_pattern(pattern: &str) -> Box<dyn Matcher> {
    match pattern.strip_suffix("/*") {
        Some(base) => Box::new(SubtreeMatcher::new(base)),
        None => Box::new(PathPrefixMatcher::new(pattern)),
    }
}
