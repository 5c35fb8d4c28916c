use crate::domain::ports::ReverseGeocoder;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Reverse-geocoding client. Returns a locality/address string for a point;
/// a point the service does not know is `None`, not an error.
#[derive(Debug, Clone)]
pub struct ReverseGeocodeClient {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    display_name: Option<String>,
}

impl ReverseGeocodeClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl ReverseGeocoder for ReverseGeocodeClient {
    async fn locate(&self, latitude: f64, longitude: f64) -> Result<Option<String>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("lat", latitude), ("lon", longitude)])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("Geocoder answered {}", response.status());
            return Ok(None);
        }

        let body: GeocodeResponse = response.json().await?;
        Ok(body.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_locality_returned() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/reverse")
                .query_param("lat", "6.45")
                .query_param("lon", "7.05");
            then.status(200)
                .json_body(serde_json::json!({"display_name": "Independence Layout, Enugu"}));
        });

        let client = ReverseGeocodeClient::new(server.url("/reverse"));
        let locality = client.locate(6.45, 7.05).await.unwrap();

        mock.assert();
        assert_eq!(locality.as_deref(), Some("Independence Layout, Enugu"));
    }

    #[tokio::test]
    async fn test_unknown_point_is_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/reverse");
            then.status(404);
        });

        let client = ReverseGeocodeClient::new(server.url("/reverse"));
        let locality = client.locate(0.0, 0.0).await.unwrap();
        assert!(locality.is_none());
    }
}
