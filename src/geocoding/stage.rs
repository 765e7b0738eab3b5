//! Geocoding enrichment stage.
//!
//! Reads `streetAddress`, `city` and `state` from the body, asks the provider
//! for the composed address and attaches the first result's [`Coordinates`].
//! Any failure leaves the context untouched.

use std::sync::Arc;

use async_trait::async_trait;

use super::provider::{Coordinates, GeocodeResponse, GeocodingProvider};
use crate::error::AppError;
use crate::observability::metrics;
use crate::pipeline::{Outcome, RequestContext, Stage};
use crate::validation::{validate, ADDRESS_RULES};

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

pub struct GeocodeStage {
    provider: Arc<dyn GeocodingProvider>,
}

impl GeocodeStage {
    pub fn new(provider: Arc<dyn GeocodingProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Stage for GeocodeStage {
    fn name(&self) -> &'static str {
        "geocode"
    }

    async fn call(&self, ctx: &mut RequestContext) -> Outcome {
        if let Err(violations) = validate(ctx.body(), ADDRESS_RULES) {
            metrics::record_geocode("invalid");
            return AppError::invalid_fields(violations).into();
        }

        let query = compose_address(
            ctx.field_str("streetAddress").unwrap_or_default(),
            ctx.field_str("city").unwrap_or_default(),
            ctx.field_str("state").unwrap_or_default(),
        );

        let reply = match self.provider.lookup(&query).await {
            Ok(reply) => reply,
            Err(e) => {
                metrics::record_geocode("upstream");
                return AppError::Upstream(e.to_string()).into();
            }
        };

        match first_location(reply) {
            Ok(coordinates) => {
                tracing::debug!(
                    request_id = %ctx.request_id(),
                    lat = coordinates.lat,
                    lng = coordinates.lng,
                    "Address geocoded"
                );
                metrics::record_geocode("ok");
                ctx.attach(coordinates);
                Outcome::Continue(())
            }
            Err(err) => {
                metrics::record_geocode(match err {
                    AppError::NotFound(_) => "not_found",
                    _ => "upstream",
                });
                err.into()
            }
        }
    }
}

/// Free-text query in street, city, region order.
pub fn compose_address(street: &str, city: &str, state: &str) -> String {
    format!("{}, {}, {}", street.trim(), city.trim(), state.trim())
}

/// Accept only a successful reply with at least one result.
fn first_location(reply: GeocodeResponse) -> Result<Coordinates, AppError> {
    match reply.status.as_str() {
        STATUS_OK => reply
            .results
            .into_iter()
            .next()
            .map(|r| r.geometry.location)
            .ok_or_else(|| AppError::NotFound("No location found for the given address".into())),
        STATUS_ZERO_RESULTS => Err(AppError::NotFound("No location found for the given address".into())),
        other => Err(AppError::Upstream(match reply.error_message {
            Some(detail) => format!("Geocoding provider returned {other}: {detail}"),
            None => format!("Geocoding provider returned {other}"),
        })),
    }
}
