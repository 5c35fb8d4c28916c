pub mod constants;
pub mod fee_tables;

use crate::domain::model::LandUse;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "parcel-fees")]
#[command(about = "Cadastral parcel processing and survey fee calculation")]
pub struct CliConfig {
    /// CSV file with Easting/Northing columns for the parcel ring
    pub coordinates: String,

    /// Spatial zoning service endpoint; omit to classify offline via --schedule
    #[arg(long)]
    pub zoning_endpoint: Option<String>,

    /// Reverse-geocoding endpoint for locality enrichment
    #[arg(long)]
    pub geocode_endpoint: Option<String>,

    /// Pricing schedule to assume when no zoning endpoint is given
    #[arg(long)]
    pub schedule: Option<String>,

    #[arg(long, value_enum, default_value = "residential")]
    pub land_use: LandUse,

    /// TOML fee-table file; built-in statutory tables are used when omitted
    #[arg(long)]
    pub fee_tables: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("coordinates", &self.coordinates)?;

        if let Some(endpoint) = &self.zoning_endpoint {
            validate_url("zoning_endpoint", endpoint)?;
        }
        if let Some(endpoint) = &self.geocode_endpoint {
            validate_url("geocode_endpoint", endpoint)?;
        }
        if let Some(path) = &self.fee_tables {
            validate_path("fee_tables", path)?;
        }
        if let Some(schedule) = &self.schedule {
            crate::domain::model::Schedule::parse(schedule)?;
        }

        Ok(())
    }
}
