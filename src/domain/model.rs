use crate::utils::error::{Result, SurveyError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A projected survey coordinate in meters, as read from the upload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawCoordinate {
    pub easting: f64,
    pub northing: f64,
}

/// A WGS84 coordinate in decimal degrees, derived by the transformer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeographicPoint {
    pub longitude: f64,
    pub latitude: f64,
}

/// Implemented by the two point types so ring construction can stay generic.
pub trait RingPoint: Copy {
    fn xy(&self) -> (f64, f64);
}

impl RingPoint for RawCoordinate {
    fn xy(&self) -> (f64, f64) {
        (self.easting, self.northing)
    }
}

impl RingPoint for GeographicPoint {
    fn xy(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }
}

/// A closed vertex sequence: first point equals last, at least 4 stored
/// points. Constructed only through [`crate::core::polygon::close_ring`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring<P> {
    points: Vec<P>,
}

impl<P: RingPoint> Ring<P> {
    pub(crate) fn from_closed(points: Vec<P>) -> Self {
        debug_assert!(points.len() >= 4);
        Self { points }
    }

    pub fn points(&self) -> &[P] {
        &self.points
    }

    /// Vertex count excluding the closing duplicate.
    pub fn vertex_count(&self) -> usize {
        self.points.len() - 1
    }
}

/// Regulatory pricing zone code. Parsed case-insensitively from a single
/// letter (an optional "SCHEDULE" prefix is tolerated); displayed in the
/// statutory `SCHEDULE X` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Schedule {
    A,
    B,
    C,
    D,
}

impl Schedule {
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let letter = trimmed
            .strip_prefix("SCHEDULE")
            .or_else(|| trimmed.strip_prefix("schedule"))
            .or_else(|| trimmed.strip_prefix("Schedule"))
            .unwrap_or(trimmed)
            .trim();

        match letter.to_ascii_uppercase().as_str() {
            "A" => Ok(Schedule::A),
            "B" => Ok(Schedule::B),
            "C" => Ok(Schedule::C),
            "D" => Ok(Schedule::D),
            _ => Err(SurveyError::InvalidSchedule {
                value: input.to_string(),
            }),
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Schedule::A => 'A',
            Schedule::B => 'B',
            Schedule::C => 'C',
            Schedule::D => 'D',
        }
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SCHEDULE {}", self.letter())
    }
}

/// One row from the spatial zoning collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneMatch {
    pub schedule: Schedule,
    pub purpose: String,
}

/// GeoJSON-style polygon payload sent to the zoning collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoPolygon {
    pub r#type: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl GeoPolygon {
    pub fn from_ring(ring: &Ring<GeographicPoint>) -> Self {
        let shell = ring
            .points()
            .iter()
            .map(|p| [p.longitude, p.latitude])
            .collect();
        Self {
            r#type: "Polygon".to_string(),
            coordinates: vec![shell],
        }
    }
}

/// A surveyed parcel with its derived figures. Area and zone are computed,
/// never set directly.
#[derive(Debug, Clone, Serialize)]
pub struct Parcel {
    pub projected: Ring<RawCoordinate>,
    pub geographic: Ring<GeographicPoint>,
    pub area_sqm: f64,
    pub area_ha: f64,
    pub zone: Option<ZoneMatch>,
}

/// Residential/commercial fee figures carried together; the caller picks
/// the applicable one by land-use type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeePair {
    pub residential: f64,
    pub commercial: f64,
}

impl FeePair {
    pub fn select(&self, land_use: LandUse) -> f64 {
        match land_use {
            LandUse::Residential => self.residential,
            LandUse::Commercial => self.commercial,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LandUse {
    Residential,
    Commercial,
}

/// Outcome of an area-banded fee lookup. Direct results come straight from
/// the statutory table; calculated results apply the per-hectare excess
/// rate above the large-property threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FeeResult {
    Direct {
        schedule: Schedule,
        size_min: f64,
        size_max: f64,
        fees: FeePair,
    },
    Calculated {
        schedule: Schedule,
        base_size_min: f64,
        base_size_max: f64,
        base_fee: FeePair,
        additional_hectares: f64,
        additional_rate: FeePair,
        fees: FeePair,
    },
}

impl FeeResult {
    pub fn fees(&self) -> FeePair {
        match self {
            FeeResult::Direct { fees, .. } | FeeResult::Calculated { fees, .. } => *fees,
        }
    }

    pub fn is_calculated(&self) -> bool {
        matches!(self, FeeResult::Calculated { .. })
    }
}

/// Outcome of a plot-count-banded layout fee lookup. The caller multiplies
/// `unit_price` by the plot count where a total is needed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutQuote {
    pub plots: u32,
    pub schedule: Schedule,
    pub unit_price: f64,
    pub mandatory_deposit: f64,
    pub min_plots: u32,
    pub max_plots: Option<u32>,
}

/// Pillar-application classification by marker count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarClass {
    Regular,
    Special,
}

/// Billing period a quota record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub quarter: u8,
    pub year: i32,
}

impl BillingPeriod {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            quarter: ((date.month0() / 3) + 1) as u8,
            year: date.year(),
        }
    }
}

/// Per-submitter, per-quarter pillar application counters. Created on first
/// application in a period; counters only ever increase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserQuota {
    pub user_id: String,
    pub quarter: u8,
    pub year: i32,
    pub regular_pillars_applied: u32,
    pub special_pillars_applied: u32,
    pub quota_limit: u32,
}

impl UserQuota {
    /// Applications left before the configured limit. Reported for the
    /// outer application to warn on; submission is not gated here.
    pub fn remaining_quota(&self) -> u32 {
        self.quota_limit
            .saturating_sub(self.regular_pillars_applied + self.special_pillars_applied)
    }
}
