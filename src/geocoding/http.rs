//! HTTP adapter for a Google-style geocoding API.

use async_trait::async_trait;
use url::Url;

use super::provider::{GeocodeError, GeocodeResponse, GeocodingProvider};

/// Calls `GET <endpoint>?address=<query>&key=<api_key>`.
#[derive(Debug, Clone)]
pub struct HttpGeocoder {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl HttpGeocoder {
    pub fn new(endpoint: Url, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: api_key.into(),
        }
    }

    fn request_url(&self, address: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("key", &self.api_key);
        url
    }
}

#[async_trait]
impl GeocodingProvider for HttpGeocoder {
    async fn lookup(&self, address: &str) -> Result<GeocodeResponse, GeocodeError> {
        let response = self.client.get(self.request_url(address)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status));
        }

        Ok(response.json::<GeocodeResponse>().await?)
    }
}
