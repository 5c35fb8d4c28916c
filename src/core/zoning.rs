use crate::config::constants::ZONE_LOOKUP_RETRIES;
use crate::domain::model::{GeoPolygon, GeographicPoint, Ring, ZoneMatch};
use crate::domain::ports::ZoneLookup;
use crate::utils::error::{Result, SurveyError};

/// Classifies a parcel into its pricing schedule via the spatial zoning
/// collaborator. Transport failures are retried a bounded number of times;
/// a definitive empty result is terminal and blocks fee computation.
pub struct ZoneClassifier<L: ZoneLookup> {
    lookup: L,
}

impl<L: ZoneLookup> ZoneClassifier<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    pub async fn classify(&self, ring: &Ring<GeographicPoint>) -> Result<ZoneMatch> {
        let polygon = GeoPolygon::from_ring(ring);

        let mut attempt = 0u32;
        let matches = loop {
            match self.lookup.zones_containing(&polygon).await {
                Ok(matches) => break matches,
                Err(SurveyError::ZoneLookupUnavailable { reason }) => {
                    attempt += 1;
                    if attempt > ZONE_LOOKUP_RETRIES {
                        return Err(SurveyError::ZoneLookupUnavailable { reason });
                    }
                    tracing::warn!(
                        "Zone lookup attempt {} failed ({}), retrying",
                        attempt,
                        reason
                    );
                }
                Err(e) => return Err(e),
            }
        };

        let mut matches = matches.into_iter();
        let first = matches.next().ok_or(SurveyError::NoZoneMatch)?;
        let discarded: Vec<_> = matches.map(|m| m.schedule).collect();
        if !discarded.is_empty() {
            // Parcel straddles zones; the collaborator's ordering decides.
            tracing::warn!(
                "Parcel matched {} zones; using {} and discarding {:?}",
                discarded.len() + 1,
                first.schedule,
                discarded
            );
        }

        Ok(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Schedule;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FixedLookup {
        matches: Vec<ZoneMatch>,
    }

    #[async_trait]
    impl ZoneLookup for FixedLookup {
        async fn zones_containing(&self, _polygon: &GeoPolygon) -> Result<Vec<ZoneMatch>> {
            Ok(self.matches.clone())
        }
    }

    struct FlakyLookup {
        failures_before_success: u32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl ZoneLookup for FlakyLookup {
        async fn zones_containing(&self, _polygon: &GeoPolygon) -> Result<Vec<ZoneMatch>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures_before_success {
                Err(SurveyError::ZoneLookupUnavailable {
                    reason: "connection reset".to_string(),
                })
            } else {
                Ok(vec![ZoneMatch {
                    schedule: Schedule::C,
                    purpose: "Mixed use".to_string(),
                }])
            }
        }
    }

    fn test_ring() -> Ring<GeographicPoint> {
        crate::core::polygon::close_ring(vec![
            GeographicPoint { longitude: 7.0, latitude: 6.4 },
            GeographicPoint { longitude: 7.1, latitude: 6.4 },
            GeographicPoint { longitude: 7.1, latitude: 6.5 },
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_single_match_wins() {
        let classifier = ZoneClassifier::new(FixedLookup {
            matches: vec![ZoneMatch {
                schedule: Schedule::B,
                purpose: "Residential".to_string(),
            }],
        });
        let zone = classifier.classify(&test_ring()).await.unwrap();
        assert_eq!(zone.schedule, Schedule::B);
    }

    #[tokio::test]
    async fn test_no_match_is_blocking() {
        let classifier = ZoneClassifier::new(FixedLookup { matches: vec![] });
        let err = classifier.classify(&test_ring()).await.unwrap_err();
        assert!(matches!(err, SurveyError::NoZoneMatch));
    }

    #[tokio::test]
    async fn test_first_of_multiple_matches_used() {
        let classifier = ZoneClassifier::new(FixedLookup {
            matches: vec![
                ZoneMatch {
                    schedule: Schedule::A,
                    purpose: "Commercial core".to_string(),
                },
                ZoneMatch {
                    schedule: Schedule::D,
                    purpose: "Agricultural".to_string(),
                },
            ],
        });
        let zone = classifier.classify(&test_ring()).await.unwrap();
        assert_eq!(zone.schedule, Schedule::A);
    }

    #[tokio::test]
    async fn test_transient_failure_retried() {
        let classifier = ZoneClassifier::new(FlakyLookup {
            failures_before_success: 2,
            calls: AtomicU32::new(0),
        });
        let zone = classifier.classify(&test_ring()).await.unwrap();
        assert_eq!(zone.schedule, Schedule::C);
    }

    #[tokio::test]
    async fn test_persistent_failure_propagates() {
        let classifier = ZoneClassifier::new(FlakyLookup {
            failures_before_success: 10,
            calls: AtomicU32::new(0),
        });
        let err = classifier.classify(&test_ring()).await.unwrap_err();
        assert!(matches!(err, SurveyError::ZoneLookupUnavailable { .. }));
    }
}
