use crate::domain::model::{GeoPolygon, Schedule, ZoneMatch};
use crate::domain::ports::ZoneLookup;
use crate::utils::error::{Result, SurveyError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// HTTP client for the spatial zoning service. POSTs the parcel polygon and
/// expects an ordered array of matching zone rows.
#[derive(Debug, Clone)]
pub struct HttpZoneService {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct ZoneRow {
    schedule: String,
    purpose: String,
}

impl HttpZoneService {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl ZoneLookup for HttpZoneService {
    async fn zones_containing(&self, polygon: &GeoPolygon) -> Result<Vec<ZoneMatch>> {
        tracing::debug!("Querying zoning service at {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "geometry": polygon }))
            .send()
            .await
            .map_err(|e| SurveyError::ZoneLookupUnavailable {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SurveyError::ZoneLookupUnavailable {
                reason: format!("zoning service answered {}", response.status()),
            });
        }

        let rows: Vec<ZoneRow> =
            response
                .json()
                .await
                .map_err(|e| SurveyError::ZoneLookupUnavailable {
                    reason: format!("malformed zoning response: {}", e),
                })?;

        rows.into_iter()
            .map(|row| {
                Ok(ZoneMatch {
                    schedule: Schedule::parse(&row.schedule)?,
                    purpose: row.purpose,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::polygon::close_ring;
    use crate::domain::model::GeographicPoint;
    use httpmock::prelude::*;

    fn test_polygon() -> GeoPolygon {
        let ring = close_ring(vec![
            GeographicPoint { longitude: 7.0, latitude: 6.4 },
            GeographicPoint { longitude: 7.1, latitude: 6.4 },
            GeographicPoint { longitude: 7.1, latitude: 6.5 },
        ])
        .unwrap();
        GeoPolygon::from_ring(&ring)
    }

    #[tokio::test]
    async fn test_matches_parsed_in_order() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/zones/query");
            then.status(200).json_body(serde_json::json!([
                {"schedule": "B", "purpose": "Residential"},
                {"schedule": "C", "purpose": "Mixed use"}
            ]));
        });

        let service = HttpZoneService::new(server.url("/zones/query"));
        let matches = service.zones_containing(&test_polygon()).await.unwrap();

        mock.assert();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].schedule, Schedule::B);
        assert_eq!(matches[1].purpose, "Mixed use");
    }

    #[tokio::test]
    async fn test_server_error_maps_to_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/zones/query");
            then.status(500);
        });

        let service = HttpZoneService::new(server.url("/zones/query"));
        let err = service.zones_containing(&test_polygon()).await.unwrap_err();
        assert!(matches!(err, SurveyError::ZoneLookupUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_unknown_schedule_letter_rejected() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/zones/query");
            then.status(200)
                .json_body(serde_json::json!([{"schedule": "Z", "purpose": "???"}]));
        });

        let service = HttpZoneService::new(server.url("/zones/query"));
        let err = service.zones_containing(&test_polygon()).await.unwrap_err();
        assert!(matches!(err, SurveyError::InvalidSchedule { .. }));
    }
}
