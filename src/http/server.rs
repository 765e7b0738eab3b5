//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, metrics, guard, timeout, body limit)
//! - Build the enrichment pipeline from config
//! - Serve until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};
use url::Url;

use crate::config::GatewayConfig;
use crate::geocoding::{GeocodeStage, GeocodingProvider, HttpGeocoder};
use crate::guard::RouteGuard;
use crate::http::handlers;
use crate::http::middleware::{route_guard_middleware, track_metrics};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::shutdown;
use crate::pipeline::Pipeline;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Stages run before the listing and geocode handlers.
    pub enrichment: Arc<Pipeline>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server that geocodes through the configured HTTP provider.
    pub fn new(config: GatewayConfig) -> Result<Self, url::ParseError> {
        let endpoint = Url::parse(&config.geocoding.endpoint)?;
        let provider = HttpGeocoder::new(endpoint, config.geocoding.api_key.clone());
        Ok(Self::with_provider(config, Arc::new(provider)))
    }

    /// Create a server with an explicit geocoding provider.
    pub fn with_provider(config: GatewayConfig, provider: Arc<dyn GeocodingProvider>) -> Self {
        let pipeline = Pipeline::new().stage(GeocodeStage::new(provider));
        let state = AppState {
            enrichment: Arc::new(pipeline),
        };
        let guard = Arc::new(RouteGuard::from_config(&config.guard));

        let router = Self::build_router(&config, state, guard);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run outside-in in reverse order of the `.layer` calls: request id,
    /// trace span, metrics, guard, timeout, body limit, then the route.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState, guard: Arc<RouteGuard>) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/geocode", post(handlers::geocode_address))
            .route("/api/properties", post(handlers::create_property))
            .route("/api/users/preferences", put(handlers::update_preferences))
            .route("/api/wishlists", post(handlers::create_wishlist))
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::from_fn_with_state(guard, route_guard_middleware))
            .layer(middleware::from_fn(track_metrics))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown_rx` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            protected_paths = ?self.config.guard.protected_paths,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait_for(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocoding::{GeocodeError, GeocodeResponse};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct FixedProvider(Value);

    #[async_trait]
    impl GeocodingProvider for FixedProvider {
        async fn lookup(&self, _address: &str) -> Result<GeocodeResponse, GeocodeError> {
            Ok(serde_json::from_value(self.0.clone()).unwrap())
        }
    }

    fn server(reply: Value) -> HttpServer {
        HttpServer::with_provider(GatewayConfig::default(), Arc::new(FixedProvider(reply)))
    }

    fn ok_server() -> HttpServer {
        server(json!({"status": "OK", "results": [{"geometry": {"location": {"lat": 37.1, "lng": -121.9}}}]}))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn assert_security_headers(response: &axum::response::Response) {
        let headers = response.headers();
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert_eq!(headers.get("x-xss-protection").unwrap(), "1; mode=block");
    }

    #[tokio::test]
    async fn test_geocode_endpoint_returns_coordinates() {
        let request = json_request(
            "POST",
            "/api/geocode",
            json!({"state": "CA", "city": "Springfield", "streetAddress": "123 Main St"}),
        );
        let response = ok_server().router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_security_headers(&response);
        assert!(response.headers().contains_key("x-request-id"));
        let body = body_json(response).await;
        assert_eq!(body["coordinates"], json!({"lat": 37.1, "lng": -121.9}));
    }

    #[tokio::test]
    async fn test_create_property_echoes_listing_with_coordinates() {
        let request = json_request(
            "POST",
            "/api/properties",
            json!({"title": "Loft", "state": "CA", "city": "Springfield", "streetAddress": "123 Main St"}),
        );
        let response = ok_server().router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["property"]["title"], "Loft");
        assert_eq!(body["property"]["coordinates"]["lat"], 37.1);
    }

    #[tokio::test]
    async fn test_geocode_validation_error_is_400() {
        let request = json_request("POST", "/api/geocode", json!({"city": "Springfield"}));
        let response = ok_server().router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_security_headers(&response);
        let body = body_json(response).await;
        assert_eq!(body["error"], "ValidationError");
        assert!(body["errors"].get("state").is_some());
        assert!(body["errors"].get("streetAddress").is_some());
    }

    #[tokio::test]
    async fn test_geocode_zero_results_is_404() {
        let request = json_request(
            "POST",
            "/api/geocode",
            json!({"state": "CA", "city": "Nowhere", "streetAddress": "0 Void Rd"}),
        );
        let response = server(json!({"status": "OK", "results": []}))
            .router()
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "NotFoundError");
    }

    #[tokio::test]
    async fn test_geocode_provider_error_is_502() {
        let request = json_request(
            "POST",
            "/api/geocode",
            json!({"state": "CA", "city": "Springfield", "streetAddress": "123 Main St"}),
        );
        let response = server(json!({"status": "OVER_QUERY_LIMIT"}))
            .router()
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_malformed_json_goes_through_reporter() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/geocode")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = ok_server().router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "ValidationError");
    }

    #[tokio::test]
    async fn test_non_object_body_rejected() {
        let request = json_request("POST", "/api/properties", json!(["a", "b"]));
        let response = ok_server().router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_preferences_endpoint() {
        let ok = json_request(
            "PUT",
            "/api/users/preferences",
            json!({"interestedIn": ["rent"], "budget": {"min": 100, "max": 900}}),
        );
        let response = ok_server().router().oneshot(ok).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["preferences"]["interestedIn"][0], "rent");

        let bad = json_request("PUT", "/api/users/preferences", json!({"interestedIn": ["steal"]}));
        let response = ok_server().router().oneshot(bad).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_wishlist_endpoint() {
        let ok = json_request("POST", "/api/wishlists", json!({"agent": "agent-1", "properties": ["p1"]}));
        let response = ok_server().router().oneshot(ok).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bad = json_request("POST", "/api/wishlists", json!({"properties": ["p1"]}));
        let response = ok_server().router().oneshot(bad).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_protected_path_without_token_redirects() {
        let request = Request::builder()
            .uri("/agent/dashboard")
            .body(Body::empty())
            .unwrap();
        let response = ok_server().router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/real-estate");
        assert!(response.headers().get("x-frame-options").is_none());
    }

    #[tokio::test]
    async fn test_protected_path_with_token_continues() {
        let request = Request::builder()
            .uri("/agent/dashboard")
            .header(header::COOKIE, "token=abc")
            .body(Body::empty())
            .unwrap();
        let response = ok_server().router().oneshot(request).await.unwrap();

        // No page handler for this path; the guard let it through to the fallback.
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_security_headers(&response);
    }

    #[tokio::test]
    async fn test_unknown_route_reports_not_found() {
        let request = Request::builder()
            .uri("/api/nowhere")
            .header("x-request-id", "req-404")
            .body(Body::empty())
            .unwrap();
        let response = ok_server().router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers().get("x-request-id").unwrap(), "req-404");
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "NotFoundError");
        assert_eq!(body["message"], "Route not found");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_415() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/geocode")
            .body(Body::from(r#"{"city": "Springfield"}"#))
            .unwrap();
        let response = ok_server().router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body_json(response).await["error"], "ValidationError");
    }

    #[tokio::test]
    async fn test_oversized_body_without_length_is_413() {
        let mut config = GatewayConfig::default();
        config.security.max_body_size = 16;
        let reply = json!({"status": "OK", "results": []});
        let server = HttpServer::with_provider(config, Arc::new(FixedProvider(reply)));

        // No content-length header, so the limit trips while the body is read.
        let request = json_request(
            "POST",
            "/api/wishlists",
            json!({"agent": "agent-1", "properties": ["p1", "p2", "p3"]}),
        );
        let response = server.router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["error"], "ValidationError");
    }

    #[tokio::test]
    async fn test_health_has_security_headers() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = ok_server().router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_security_headers(&response);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_new_rejects_bad_endpoint() {
        let mut config = GatewayConfig::default();
        config.geocoding.endpoint = "not a url".into();
        assert!(HttpServer::new(config).is_err());
    }
}
