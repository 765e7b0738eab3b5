//! Business handlers.
//!
//! Thin terminal collaborators: they run the enrichment pipeline or a rule
//! table, then answer. Nothing here is persisted.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::{json, Value};

use crate::error::{self, AppError};
use crate::geocoding::Coordinates;
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::pipeline::{Outcome, RequestContext};
use crate::validation::{validate_document, PREFERENCE_RULES, WISHLIST_RULES};

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn not_found(headers: HeaderMap) -> Response {
    error::report(&request_id(&headers), AppError::NotFound("Route not found".into()))
}

/// `POST /api/geocode`: resolve an address to coordinates.
pub async fn geocode_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let request_id = request_id(&headers);
    enrich(&state, &request_id, payload, |ctx| {
        let coordinates = require_coordinates(&ctx)?;
        Ok(Json(json!({"success": true, "coordinates": coordinates})).into_response())
    })
    .await
}

/// `POST /api/properties`: accept a listing and return it with its coordinates.
pub async fn create_property(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let request_id = request_id(&headers);
    enrich(&state, &request_id, payload, |ctx| {
        let coordinates = require_coordinates(&ctx)?;
        let mut listing = ctx.into_body();
        listing.insert("coordinates".to_string(), json!(coordinates));

        tracing::info!(request_id = %request_id, "Listing accepted");
        Ok((StatusCode::CREATED, Json(json!({"success": true, "property": listing}))).into_response())
    })
    .await
}

/// `PUT /api/users/preferences`
pub async fn update_preferences(
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let request_id = request_id(&headers);
    let result = parse_body(payload).and_then(|body| validate_document(body, PREFERENCE_RULES));

    match result {
        Ok(preferences) => Json(json!({"success": true, "preferences": preferences})).into_response(),
        Err(err) => error::report(&request_id, err),
    }
}

/// `POST /api/wishlists`
pub async fn create_wishlist(
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let request_id = request_id(&headers);
    let result = parse_body(payload).and_then(|body| validate_document(body, WISHLIST_RULES));

    match result {
        Ok(wishlist) => {
            (StatusCode::CREATED, Json(json!({"success": true, "wishlist": wishlist}))).into_response()
        }
        Err(err) => error::report(&request_id, err),
    }
}

/// Run the enrichment pipeline, then `terminal` on the enriched context.
async fn enrich<F>(
    state: &AppState,
    request_id: &str,
    payload: Result<Json<Value>, JsonRejection>,
    terminal: F,
) -> Response
where
    F: FnOnce(RequestContext) -> Result<Response, AppError>,
{
    let ctx = match parse_body(payload).and_then(|body| RequestContext::from_json(request_id, body)) {
        Ok(ctx) => ctx,
        Err(err) => return error::report(request_id, err),
    };

    match state.enrichment.run(ctx).await {
        Outcome::Continue(ctx) => terminal(ctx).unwrap_or_else(|err| error::report(request_id, err)),
        Outcome::Redirect(location) => Redirect::temporary(&location).into_response(),
        Outcome::Fail(err) => error::report(request_id, err),
    }
}

/// Unreadable bodies keep their own status when oversized or of the wrong
/// content type; anything else is a malformed document.
fn parse_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        let status = rejection.status();
        if status == StatusCode::PAYLOAD_TOO_LARGE || status == StatusCode::UNSUPPORTED_MEDIA_TYPE {
            AppError::Payload {
                status,
                message: rejection.body_text(),
            }
        } else {
            AppError::malformed(rejection.body_text())
        }
    })
}

fn require_coordinates(ctx: &RequestContext) -> Result<Coordinates, AppError> {
    ctx.derived::<Coordinates>()
        .copied()
        .ok_or_else(|| AppError::Upstream("Geocoding produced no coordinates".into()))
}
