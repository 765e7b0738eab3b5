//! Inbound request pipeline.
//!
//! # Data Flow
//! ```text
//! handler receives body
//!     → context.rs (RequestContext: body fields + typed derived fields)
//!     → stage.rs (Pipeline runs each Stage in order)
//!         Continue     → next stage
//!         Redirect     → stop, redirect response
//!         Fail(error)  → stop, centralized error reporter
//!     → terminal handler sees a fully enriched context
//! ```
//!
//! # Design Decisions
//! - Short-circuiting is an explicit return value, not unwinding
//! - Stages are stateless and shared across requests behind `Arc`
//! - Within one request the pipeline is strictly sequential

pub mod context;
pub mod stage;

pub use context::RequestContext;
pub use stage::{Outcome, Pipeline, Stage};
