//! Endpoint-level checks of the two fee query surfaces against the
//! statutory default tables.

use parcel_fees::api::query::{area_fee_query, error_body, layout_fee_query};
use parcel_fees::FeeTables;

#[test]
fn test_area_query_threshold_boundary() {
    let tables = FeeTables::default();

    // Exactly at the large-property threshold: still a table lookup.
    let at = area_fee_query(&tables, "500000", "A").unwrap();
    let at_json = serde_json::to_value(&at).unwrap();
    assert!(at_json.get("is_calculated").is_none());
    assert_eq!(at.residential_survey_fee, 600_000.0);

    // One square meter over: calculated branch with audit figures.
    let over = area_fee_query(&tables, "500001", "A").unwrap();
    assert!(over.is_calculated);
    let additional = over.additional_hectares.unwrap();
    assert!((additional - 0.0001).abs() < 1e-12);
    // Whole-unit rounding on top of the base fee.
    assert_eq!(over.base_fee.unwrap().residential, 600_000.0);
    let fee = over.residential_survey_fee;
    assert_eq!(fee, fee.round());
    assert!((600_000.0..=600_001.0).contains(&fee));
}

#[test]
fn test_area_query_schedule_normalization() {
    let tables = FeeTables::default();
    for input in ["b", "B", " schedule b "] {
        let response = area_fee_query(&tables, "237000", input).unwrap();
        assert_eq!(response.schedule, "SCHEDULE B");
        assert_eq!(response.residential_survey_fee, 450_000.0);
    }
    assert!(area_fee_query(&tables, "237000", "F").is_err());
}

#[test]
fn test_area_query_rejections_carry_statuses() {
    let tables = FeeTables::default();
    assert_eq!(
        area_fee_query(&tables, "", "A").unwrap_err().http_status(),
        400
    );
    assert_eq!(
        area_fee_query(&tables, "-10", "A").unwrap_err().http_status(),
        400
    );
    assert_eq!(
        area_fee_query(&tables, "100", "X").unwrap_err().http_status(),
        400
    );
}

#[test]
fn test_layout_query_across_all_brackets() {
    let tables = FeeTables::default();

    let mut previous_price = 0.0;
    for plots in ["2", "10", "11", "50", "51", "100", "101", "2500"] {
        let response = layout_fee_query(&tables, plots, "D").unwrap();
        assert!(
            response.price >= previous_price,
            "unit price fell at {} plots",
            plots
        );
        assert!(response.mandatory_deposit > 0.0);
        previous_price = response.price;
    }

    // Floor of the open-ended top bracket.
    let top = layout_fee_query(&tables, "101", "D").unwrap();
    assert_eq!(top.price_range.min_plots, 101);
    assert_eq!(top.price_range.max_plots, None);
}

#[test]
fn test_layout_query_overflow_guidance() {
    let mut tables = FeeTables::default();
    tables.layout.tier.retain(|t| t.max_plots.is_some());

    let err = layout_fee_query(&tables, "999", "A").unwrap_err();
    assert_eq!(err.http_status(), 400);

    let body = error_body(&err);
    assert_eq!(body["maximum_available_plots"], serde_json::json!(51));
    assert!(body["error"].as_str().unwrap().contains("999"));
}

#[test]
fn test_layout_query_missing_pricing_is_404() {
    let mut tables = FeeTables::default();
    tables.layout.tier.clear();
    let err = layout_fee_query(&tables, "5", "A").unwrap_err();
    assert_eq!(err.http_status(), 404);

    let body = error_body(&err);
    assert!(body["error"].as_str().unwrap().contains("pricing"));
}
