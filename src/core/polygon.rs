use crate::config::constants::{RING_CLOSE_EPSILON, SQM_PER_HECTARE};
use crate::domain::model::{RawCoordinate, Ring, RingPoint};
use crate::utils::error::{Result, SurveyError};
use serde::Serialize;

/// Close an ordered vertex sequence into a ring, appending a copy of the
/// first point when the last does not already match it within tolerance.
/// Idempotent on closed input. Fewer than 3 distinct vertices is an error.
pub fn close_ring<P: RingPoint>(points: Vec<P>) -> Result<Ring<P>> {
    let distinct = count_distinct(&points);
    if distinct < 3 {
        return Err(SurveyError::InsufficientVertices { found: distinct });
    }

    let mut points = points;
    let first = points[0];
    let last = points[points.len() - 1];
    if !same_point(&first, &last) {
        points.push(first);
    }

    Ok(Ring::from_closed(points))
}

fn same_point<P: RingPoint>(a: &P, b: &P) -> bool {
    let (ax, ay) = a.xy();
    let (bx, by) = b.xy();
    (ax - bx).abs() <= RING_CLOSE_EPSILON && (ay - by).abs() <= RING_CLOSE_EPSILON
}

fn count_distinct<P: RingPoint>(points: &[P]) -> usize {
    let mut distinct: Vec<&P> = Vec::new();
    for point in points {
        if !distinct.iter().any(|seen| same_point(*seen, point)) {
            distinct.push(point);
        }
    }
    distinct.len()
}

/// Planar area figures in both statutory units, rounded to 2 decimal
/// places for display parity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AreaFigures {
    pub sqm: f64,
    pub hectares: f64,
}

/// Shoelace area over the projected (metric) ring. Self-intersecting or
/// otherwise malformed rings are not detected; the formula's result is
/// returned as-is, which callers must treat as a documented caveat.
pub fn compute_area(ring: &Ring<RawCoordinate>) -> AreaFigures {
    let points = ring.points();
    let mut doubled: f64 = 0.0;
    for pair in points.windows(2) {
        let (x1, y1) = pair[0].xy();
        let (x2, y2) = pair[1].xy();
        doubled += x1 * y2 - x2 * y1;
    }
    let sqm = doubled.abs() / 2.0;

    AreaFigures {
        sqm: round2(sqm),
        hectares: round2(sqm / SQM_PER_HECTARE),
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
