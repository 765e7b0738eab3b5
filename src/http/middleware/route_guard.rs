//! Edge routing guard middleware.
//! Redirects unauthenticated requests for protected paths and stamps the
//! security headers on everything it lets through.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::guard::{GuardDecision, RouteGuard};
use crate::http::request::request_id;
use crate::observability::metrics;
use crate::security::apply_security_headers;

pub async fn route_guard_middleware(
    State(guard): State<Arc<RouteGuard>>,
    request: Request,
    next: Next,
) -> Response {
    let token = guard.token_from_headers(request.headers());

    match guard.decide(request.uri().path(), token.as_deref()) {
        GuardDecision::Redirect(location) => {
            tracing::info!(
                request_id = %request_id(request.headers()),
                path = %request.uri().path(),
                location = %location,
                "Protected path without auth token, redirecting"
            );
            metrics::record_guard("redirect");
            Redirect::temporary(&location).into_response()
        }
        GuardDecision::Continue => {
            metrics::record_guard("continue");
            let mut response = next.run(request).await;
            apply_security_headers(response.headers_mut());
            response
        }
    }
}
