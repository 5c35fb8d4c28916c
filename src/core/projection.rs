use crate::config::constants::{SOURCE_CRS, TARGET_CRS};
use crate::domain::model::{GeographicPoint, RawCoordinate};
use crate::utils::error::{Result, SurveyError};
use proj4rs::proj::Proj;
use proj4rs::transform::transform;

/// Transforms projected survey coordinates into WGS84 geographic points.
/// The CRS pair is fixed (see `config::constants`); the transform is a pure
/// per-point function, so a ring is handled by mapping it over every vertex.
pub struct ProjectionTransformer {
    source: Proj,
    target: Proj,
}

impl ProjectionTransformer {
    pub fn new() -> Result<Self> {
        Self::with_crs(SOURCE_CRS, TARGET_CRS)
    }

    pub fn with_crs(source: &str, target: &str) -> Result<Self> {
        let source = Proj::from_proj_string(source).map_err(|e| SurveyError::ConfigError {
            message: format!("Invalid source CRS definition: {}", e),
        })?;
        let target = Proj::from_proj_string(target).map_err(|e| SurveyError::ConfigError {
            message: format!("Invalid target CRS definition: {}", e),
        })?;
        Ok(Self { source, target })
    }

    /// Transform one coordinate. Meters in, degrees out.
    pub fn to_geographic(&self, coordinate: &RawCoordinate) -> Result<GeographicPoint> {
        let mut point = (coordinate.easting, coordinate.northing, 0.0);
        transform(&self.source, &self.target, &mut point).map_err(|e| SurveyError::Projection {
            easting: coordinate.easting,
            northing: coordinate.northing,
            reason: e.to_string(),
        })?;

        // longlat output is in radians.
        Ok(GeographicPoint {
            longitude: point.0.to_degrees(),
            latitude: point.1.to_degrees(),
        })
    }

    /// Transform a whole vertex sequence. Any failing point is fatal for
    /// the ring; a silently dropped vertex would corrupt the area downstream.
    pub fn transform_all(&self, coordinates: &[RawCoordinate]) -> Result<Vec<GeographicPoint>> {
        coordinates
            .iter()
            .map(|c| self.to_geographic(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_lands_in_target_domain() {
        let transformer = ProjectionTransformer::new().unwrap();
        // A point well inside UTM zone 32N.
        let point = transformer
            .to_geographic(&RawCoordinate {
                easting: 500_000.0,
                northing: 800_000.0,
            })
            .unwrap();
        // Zone 32 central meridian is 9°E; the datum shift moves it slightly.
        assert!((point.longitude - 9.0).abs() < 0.5);
        assert!(point.latitude > 6.0 && point.latitude < 8.5);
    }

    #[test]
    fn test_transform_is_per_point_pure() {
        let transformer = ProjectionTransformer::new().unwrap();
        let coordinate = RawCoordinate {
            easting: 543_210.0,
            northing: 712_345.0,
        };
        let first = transformer.to_geographic(&coordinate).unwrap();
        let second = transformer.to_geographic(&coordinate).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_transform_all_preserves_order_and_length() {
        let transformer = ProjectionTransformer::new().unwrap();
        let coordinates = vec![
            RawCoordinate { easting: 500_000.0, northing: 800_000.0 },
            RawCoordinate { easting: 500_100.0, northing: 800_000.0 },
            RawCoordinate { easting: 500_100.0, northing: 800_100.0 },
        ];
        let points = transformer.transform_all(&coordinates).unwrap();
        assert_eq!(points.len(), 3);
        // Eastward step means increasing longitude.
        assert!(points[1].longitude > points[0].longitude);
        // Northward step means increasing latitude.
        assert!(points[2].latitude > points[1].latitude);
    }

    #[test]
    fn test_bad_crs_rejected() {
        assert!(ProjectionTransformer::with_crs("+proj=nonsense", TARGET_CRS).is_err());
    }
}
