use crate::config::fee_tables::FeeTables;
use crate::core::parcel_fees::ParcelFeeEngine;
use crate::core::polygon::{close_ring, compute_area};
use crate::core::projection::ProjectionTransformer;
use crate::core::zoning::ZoneClassifier;
use crate::core::{parser, polygon::AreaFigures};
use crate::domain::model::{FeeResult, GeographicPoint, Parcel, Ring, ZoneMatch};
use crate::domain::ports::{ReverseGeocoder, ZoneLookup};
use crate::utils::error::Result;
use std::io::Read;

/// Everything the workflow needs downstream of a coordinate upload: the
/// parcel with both rings, its area figures, the matched zone, and the fee
/// quote for that zone and size.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SurveyReport {
    pub parcel: Parcel,
    pub area: AreaFigures,
    pub zone: ZoneMatch,
    pub fees: FeeResult,
    pub locality: Option<String>,
}

/// Full parcel pipeline: parse, project, close, measure, classify, price.
/// Projection, area, and fee lookups are pure; the only external calls are
/// the zoning query and the optional reverse geocode.
pub struct SurveyEngine<L: ZoneLookup> {
    transformer: ProjectionTransformer,
    classifier: ZoneClassifier<L>,
    tables: FeeTables,
}

impl<L: ZoneLookup> SurveyEngine<L> {
    pub fn new(zone_lookup: L, tables: FeeTables) -> Result<Self> {
        Ok(Self {
            transformer: ProjectionTransformer::new()?,
            classifier: ZoneClassifier::new(zone_lookup),
            tables,
        })
    }

    pub fn tables(&self) -> &FeeTables {
        &self.tables
    }

    pub async fn process<R: Read>(
        &self,
        input: R,
        geocoder: Option<&dyn ReverseGeocoder>,
    ) -> Result<SurveyReport> {
        tracing::info!("Parsing coordinate upload");
        let coordinates = parser::parse_coordinates(input)?;
        tracing::info!("Parsed {} survey coordinates", coordinates.len());

        // Close the projected ring first, then transform the closed ring so
        // the two rings stay vertex-parallel.
        let projected = close_ring(coordinates)?;
        let geographic_points = self.transformer.transform_all(projected.points())?;
        let geographic = close_ring(geographic_points)?;

        let area = compute_area(&projected);
        tracing::info!("Parcel area: {} sqm ({} ha)", area.sqm, area.hectares);

        let zone = self.classifier.classify(&geographic).await?;
        tracing::info!("Parcel classified as {} ({})", zone.schedule, zone.purpose);

        let fees = ParcelFeeEngine::new(&self.tables).quote_area(area.sqm, zone.schedule)?;

        let locality = match geocoder {
            Some(geocoder) => {
                let (latitude, longitude) = ring_centroid(&geographic);
                match geocoder.locate(latitude, longitude).await {
                    Ok(locality) => locality,
                    Err(e) => {
                        // Enrichment only; the quote stands without it.
                        tracing::warn!("Reverse geocoding failed: {}", e);
                        None
                    }
                }
            }
            None => None,
        };

        let parcel = Parcel {
            projected,
            geographic: geographic.clone(),
            area_sqm: area.sqm,
            area_ha: area.hectares,
            zone: Some(zone.clone()),
        };

        Ok(SurveyReport {
            parcel,
            area,
            zone,
            fees,
            locality,
        })
    }
}

/// Vertex mean of the ring (closing duplicate excluded). Good enough to
/// anchor a reverse-geocode; not a true polygon centroid.
fn ring_centroid(ring: &Ring<GeographicPoint>) -> (f64, f64) {
    let vertices = &ring.points()[..ring.vertex_count()];
    let n = vertices.len() as f64;
    let (lon_sum, lat_sum) = vertices.iter().fold((0.0, 0.0), |(lon, lat), p| {
        (lon + p.longitude, lat + p.latitude)
    });
    (lat_sum / n, lon_sum / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::polygon::close_ring;

    #[test]
    fn test_ring_centroid_excludes_closing_vertex() {
        let ring = close_ring(vec![
            GeographicPoint { longitude: 6.0, latitude: 4.0 },
            GeographicPoint { longitude: 8.0, latitude: 4.0 },
            GeographicPoint { longitude: 8.0, latitude: 5.0 },
            GeographicPoint { longitude: 6.0, latitude: 5.0 },
        ])
        .unwrap();
        let (latitude, longitude) = ring_centroid(&ring);
        assert_eq!(latitude, 4.5);
        assert_eq!(longitude, 7.0);
    }
}
