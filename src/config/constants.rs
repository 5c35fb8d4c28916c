//! Fixed statutory and geodetic parameters, kept out of the logic modules
//! so they can be versioned and tested on their own.

use crate::domain::model::{FeePair, Schedule};

/// Source CRS for uploaded coordinates: Minna datum on the Clarke 1880
/// ellipsoid, UTM zone 32N, with the 7-parameter shift to WGS84.
pub const SOURCE_CRS: &str =
    "+proj=utm +zone=32 +ellps=clrk80 +towgs84=-92.0,-93.0,122.0,0.0,0.0,0.0,0.0 +units=m +no_defs";

/// Target CRS for storage and display.
pub const TARGET_CRS: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Above this parcel size the fee is calculated from the top band plus a
/// per-hectare excess rate instead of looked up directly.
pub const LARGE_PROPERTY_THRESHOLD_SQM: f64 = 500_000.0;

pub const SQM_PER_HECTARE: f64 = 10_000.0;

/// Pillar applications with more markers than this are "special".
pub const SPECIAL_PILLAR_THRESHOLD: u32 = 11;

/// Smallest plot count that constitutes a layout (a subdivision of one is
/// not a layout).
pub const MIN_LAYOUT_PLOTS: u32 = 2;

/// Default per-quarter application allowance when no limit is configured
/// for the submitter.
pub const DEFAULT_QUOTA_LIMIT: u32 = 40;

/// Tolerance for treating two vertices as the same point when closing a
/// ring or counting distinct vertices.
pub const RING_CLOSE_EPSILON: f64 = 1e-6;

/// Transient zone-lookup failures are retried this many times before the
/// error propagates. A definitive "no match" is never retried.
pub const ZONE_LOOKUP_RETRIES: u32 = 2;

/// Per-hectare rates applied to the area above
/// [`LARGE_PROPERTY_THRESHOLD_SQM`], in currency units per hectare.
pub fn excess_rate_per_hectare(schedule: Schedule) -> FeePair {
    match schedule {
        Schedule::A => FeePair {
            residential: 5_000.0,
            commercial: 10_000.0,
        },
        Schedule::B => FeePair {
            residential: 4_000.0,
            commercial: 8_000.0,
        },
        Schedule::C => FeePair {
            residential: 3_000.0,
            commercial: 6_000.0,
        },
        Schedule::D => FeePair {
            residential: 2_000.0,
            commercial: 4_000.0,
        },
    }
}
