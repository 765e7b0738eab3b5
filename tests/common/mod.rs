//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use realty_gateway::{GatewayConfig, HttpServer, Shutdown};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GEOCODE_PATH: &str = "/maps/api/geocode/json";

/// A running gateway bound to an ephemeral port.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the gateway with its geocoder pointed at `geocoder`.
pub async fn start_gateway(geocoder: &MockServer) -> TestGateway {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.geocoding.endpoint = format!("{}{}", geocoder.uri(), GEOCODE_PATH);
    config.geocoding.api_key = "test-key".to_string();
    config.observability.metrics_enabled = false;

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap();

    TestGateway { addr, client, shutdown }
}

/// Mount a geocoder reply for every lookup.
pub async fn mount_geocoder_reply(server: &MockServer, reply: Value) {
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply))
        .mount(server)
        .await;
}

pub fn springfield() -> Value {
    json!({"state": "CA", "city": "Springfield", "streetAddress": "123 Main St"})
}

pub fn springfield_reply() -> Value {
    json!({"status": "OK", "results": [{"geometry": {"location": {"lat": 37.1, "lng": -121.9}}}]})
}

pub fn assert_security_headers(response: &reqwest::Response) {
    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-xss-protection").unwrap(), "1; mode=block");
}
