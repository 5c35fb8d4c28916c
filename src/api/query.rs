//! The two read-only fee query endpoints, shaped for the outer application:
//! string parameters in, serializable response (or an error with an HTTP
//! status) out.

use crate::config::fee_tables::FeeTables;
use crate::core::layout_fees::LayoutFeeEngine;
use crate::core::parcel_fees::ParcelFeeEngine;
use crate::domain::model::{FeePair, FeeResult};
use crate::utils::error::{Result, SurveyError};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AreaFeeResponse {
    pub schedule: String,
    pub size_min: f64,
    pub size_max: Option<f64>,
    pub residential_survey_fee: f64,
    pub commercial_survey_fee: f64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_calculated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_fee: Option<FeePair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_hectares: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_rate: Option<FeePair>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceRange {
    pub min_plots: u32,
    pub max_plots: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutFeeResponse {
    pub plots: u32,
    pub schedule: String,
    pub price: f64,
    pub mandatory_deposit: f64,
    pub price_range: PriceRange,
}

/// Area/schedule fee query (parcel regime).
pub fn area_fee_query(tables: &FeeTables, area: &str, schedule: &str) -> Result<AreaFeeResponse> {
    let result = ParcelFeeEngine::new(tables).quote(area, schedule)?;

    Ok(match result {
        FeeResult::Direct {
            schedule,
            size_min,
            size_max,
            fees,
        } => AreaFeeResponse {
            schedule: schedule.to_string(),
            size_min,
            size_max: Some(size_max),
            residential_survey_fee: fees.residential,
            commercial_survey_fee: fees.commercial,
            is_calculated: false,
            base_fee: None,
            additional_hectares: None,
            additional_rate: None,
        },
        FeeResult::Calculated {
            schedule,
            base_size_min,
            base_fee,
            additional_hectares,
            additional_rate,
            fees,
            ..
        } => AreaFeeResponse {
            schedule: schedule.to_string(),
            size_min: base_size_min,
            // Calculated quotes are open-ended above the threshold.
            size_max: None,
            residential_survey_fee: fees.residential,
            commercial_survey_fee: fees.commercial,
            is_calculated: true,
            base_fee: Some(base_fee),
            additional_hectares: Some(additional_hectares),
            additional_rate: Some(additional_rate),
        },
    })
}

/// Layout fee query (plot-count regime).
pub fn layout_fee_query(
    tables: &FeeTables,
    plots: &str,
    schedule: &str,
) -> Result<LayoutFeeResponse> {
    let quote = LayoutFeeEngine::new(tables).quote(plots, schedule)?;

    Ok(LayoutFeeResponse {
        plots: quote.plots,
        schedule: quote.schedule.to_string(),
        price: quote.unit_price,
        mandatory_deposit: quote.mandatory_deposit,
        price_range: PriceRange {
            min_plots: quote.min_plots,
            max_plots: quote.max_plots,
        },
    })
}

/// JSON error body the outer application returns alongside
/// [`SurveyError::http_status`]. The plot-count overflow carries the top
/// bracket's floor as guidance.
pub fn error_body(error: &SurveyError) -> serde_json::Value {
    match error {
        SurveyError::PlotCountExceedsMaximum {
            maximum_available_plots,
            ..
        } => serde_json::json!({
            "error": error.to_string(),
            "maximum_available_plots": maximum_available_plots,
        }),
        _ => serde_json::json!({ "error": error.to_string() }),
    }
}
