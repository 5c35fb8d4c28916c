use crate::domain::model::Schedule;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("No valid Easting/Northing pairs found in input ({rows_seen} rows examined)")]
    EmptyOrInvalidInput { rows_seen: usize },

    #[error("Projection failed for point E={easting}, N={northing}: {reason}")]
    Projection {
        easting: f64,
        northing: f64,
        reason: String,
    },

    #[error("A polygon requires at least 3 distinct vertices, found {found}")]
    InsufficientVertices { found: usize },

    #[error("Area must be a non-negative number, got '{value}'")]
    InvalidArea { value: String },

    #[error("Schedule must be a single letter A-D, got '{value}'")]
    InvalidSchedule { value: String },

    #[error("Plot count must be an integer of at least {minimum}, got '{value}'")]
    InvalidPlotCount { value: String, minimum: u32 },

    #[error("No pricing zone matches the supplied parcel geometry")]
    NoZoneMatch,

    #[error("No fee band covers {area_sqm} sqm under {schedule}")]
    NoFeeBand { schedule: Schedule, area_sqm: f64 },

    #[error("No layout pricing tiers are configured")]
    NoPricingData,

    #[error("No price column for {schedule} in the tier starting at {min_plots} plots")]
    SchedulePriceNotFound { schedule: Schedule, min_plots: u32 },

    #[error("Plot count {plots} exceeds the largest configured bracket; maximum available is {maximum_available_plots} plots")]
    PlotCountExceedsMaximum {
        plots: u32,
        maximum_available_plots: u32,
    },

    #[error("Zone lookup service unavailable: {reason}")]
    ZoneLookupUnavailable { reason: String },
}

impl SurveyError {
    /// HTTP status the outer application should answer with when this error
    /// surfaces from one of the read-only query endpoints.
    pub fn http_status(&self) -> u16 {
        match self {
            SurveyError::InvalidArea { .. }
            | SurveyError::InvalidSchedule { .. }
            | SurveyError::InvalidPlotCount { .. }
            | SurveyError::PlotCountExceedsMaximum { .. }
            | SurveyError::EmptyOrInvalidInput { .. }
            | SurveyError::InsufficientVertices { .. }
            | SurveyError::ValidationError { .. }
            | SurveyError::InvalidConfigValueError { .. } => 400,
            SurveyError::NoZoneMatch
            | SurveyError::NoFeeBand { .. }
            | SurveyError::NoPricingData
            | SurveyError::SchedulePriceNotFound { .. } => 404,
            SurveyError::ZoneLookupUnavailable { .. } => 503,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, SurveyError>;
