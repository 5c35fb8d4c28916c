pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::http_zones::HttpZoneService;
pub use crate::adapters::memory::{InMemoryQuotaStore, StaticZoneLookup};
pub use crate::config::{fee_tables::FeeTables, CliConfig};
pub use crate::core::engine::{SurveyEngine, SurveyReport};
pub use crate::core::quota::{classify_pillars, QuotaService};
pub use crate::domain::model::{LandUse, Schedule};
pub use crate::utils::error::{Result, SurveyError};
