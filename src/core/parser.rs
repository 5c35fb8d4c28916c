use crate::domain::model::RawCoordinate;
use crate::utils::error::{Result, SurveyError};
use std::io::Read;

/// Read Easting/Northing pairs from a CSV upload. Header matching is
/// case-insensitive; rows whose fields do not parse as numbers are skipped
/// with a warning. Zero valid rows is an error, not an empty ring.
pub fn parse_coordinates<R: Read>(reader: R) -> Result<Vec<RawCoordinate>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let easting_idx = column_index(&headers, "easting");
    let northing_idx = column_index(&headers, "northing");

    let (easting_idx, northing_idx) = match (easting_idx, northing_idx) {
        (Some(e), Some(n)) => (e, n),
        _ => {
            return Err(SurveyError::ValidationError {
                message: "Input must have Easting and Northing columns".to_string(),
            })
        }
    };

    let mut coordinates = Vec::new();
    let mut rows_seen = 0usize;

    for record in csv_reader.records() {
        let record = record?;
        rows_seen += 1;

        let easting = record.get(easting_idx).and_then(|v| v.parse::<f64>().ok());
        let northing = record.get(northing_idx).and_then(|v| v.parse::<f64>().ok());

        match (easting, northing) {
            (Some(easting), Some(northing)) if easting.is_finite() && northing.is_finite() => {
                coordinates.push(RawCoordinate { easting, northing });
            }
            _ => {
                tracing::warn!("Skipping row {}: non-numeric Easting/Northing", rows_seen);
            }
        }
    }

    if coordinates.is_empty() {
        return Err(SurveyError::EmptyOrInvalidInput { rows_seen });
    }

    tracing::debug!(
        "Parsed {} coordinates from {} rows",
        coordinates.len(),
        rows_seen
    );
    Ok(coordinates)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_rows_in_order() {
        let input = "Easting,Northing\n543210.5,712345.1\n543300.0,712400.0\n543250.0,712500.0\n";
        let coords = parse_coordinates(input.as_bytes()).unwrap();
        assert_eq!(coords.len(), 3);
        assert_eq!(coords[0].easting, 543210.5);
        assert_eq!(coords[2].northing, 712500.0);
    }

    #[test]
    fn test_invalid_rows_skipped() {
        let input = "Easting,Northing\n1.0,2.0\nabc,2.0\n3.0,def\n5.0,6.0\n";
        let coords = parse_coordinates(input.as_bytes()).unwrap();
        assert_eq!(coords.len(), 2);
        assert_eq!(coords[1].easting, 5.0);
    }

    #[test]
    fn test_all_invalid_fails() {
        let input = "Easting,Northing\nabc,def\n,\n";
        let err = parse_coordinates(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            SurveyError::EmptyOrInvalidInput { rows_seen: 2 }
        ));
    }

    #[test]
    fn test_header_case_insensitive() {
        let input = "EASTING,northing\n1.0,2.0\n";
        let coords = parse_coordinates(input.as_bytes()).unwrap();
        assert_eq!(coords.len(), 1);
    }

    #[test]
    fn test_missing_columns_rejected() {
        let input = "X,Y\n1.0,2.0\n";
        assert!(parse_coordinates(input.as_bytes()).is_err());
    }
}
