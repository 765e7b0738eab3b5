//! Stage contract and the sequential pipeline runner.

use std::sync::Arc;

use async_trait::async_trait;

use super::context::RequestContext;
use crate::error::AppError;

/// Result of one stage, or of the whole pipeline.
#[derive(Debug)]
pub enum Outcome<T = ()> {
    /// Forward to the next stage (or to the terminal handler).
    Continue(T),
    /// Stop and send the client elsewhere.
    Redirect(String),
    /// Stop and hand the error to the reporter.
    Fail(AppError),
}

impl<T> Outcome<T> {
    pub fn is_continue(&self) -> bool {
        matches!(self, Outcome::Continue(_))
    }
}

impl From<AppError> for Outcome {
    fn from(err: AppError) -> Self {
        Outcome::Fail(err)
    }
}

/// One unit of request processing.
///
/// Stages hold no per-request state; one instance serves every request.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Inspect and optionally enrich the context.
    async fn call(&self, ctx: &mut RequestContext) -> Outcome;
}

/// Ordered chain of stages. Stops at the first outcome that is not `Continue`.
#[derive(Clone, Default)]
pub struct Pipeline {
    stages: Vec<Arc<dyn Stage>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub async fn run(&self, mut ctx: RequestContext) -> Outcome<RequestContext> {
        for stage in &self.stages {
            match stage.call(&mut ctx).await {
                Outcome::Continue(()) => {
                    tracing::debug!(request_id = %ctx.request_id(), stage = stage.name(), "Stage passed");
                }
                Outcome::Redirect(location) => {
                    tracing::debug!(
                        request_id = %ctx.request_id(),
                        stage = stage.name(),
                        location = %location,
                        "Stage redirected"
                    );
                    return Outcome::Redirect(location);
                }
                Outcome::Fail(err) => {
                    tracing::debug!(
                        request_id = %ctx.request_id(),
                        stage = stage.name(),
                        kind = err.kind(),
                        "Stage failed"
                    );
                    return Outcome::Fail(err);
                }
            }
        }
        Outcome::Continue(ctx)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.stages.iter().map(|s| s.name()).collect();
        f.debug_struct("Pipeline").field("stages", &names).finish()
    }
}
