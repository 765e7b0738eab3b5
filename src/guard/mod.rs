//! Edge routing guard.
//!
//! # Data Flow
//! ```text
//! Inbound request (path, Cookie header)
//!     → policy.rs (extract token, match protected prefixes)
//!         PROTECTED + no token → Redirect(fallback)
//!         otherwise            → Continue
//!     → http/middleware/route_guard.rs (redirect, or forward + security headers)
//! ```
//!
//! # Design Decisions
//! - Two states only: protected or not, decided by static patterns
//! - Presence-only token check; the guard never fails, a redirect is a decision

pub mod matcher;
pub mod policy;

pub use matcher::{AnyMatcher, Matcher, PathPrefixMatcher, SubtreeMatcher};
pub use policy::{GuardDecision, RouteGuard};
