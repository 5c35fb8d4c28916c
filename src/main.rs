use clap::Parser;
use parcel_fees::adapters::geocode::ReverseGeocodeClient;
use parcel_fees::domain::ports::{ReverseGeocoder, ZoneLookup};
use parcel_fees::domain::model::ZoneMatch;
use parcel_fees::utils::{logger, validation::Validate};
use parcel_fees::{
    CliConfig, FeeTables, HttpZoneService, Schedule, StaticZoneLookup, SurveyEngine,
};
use std::fs::File;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting parcel-fees CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let tables = match &config.fee_tables {
        Some(path) => FeeTables::load_from_file(path)?,
        None => FeeTables::default(),
    };
    tables.validate()?;

    let zone_lookup: Box<dyn ZoneLookup> = match (&config.zoning_endpoint, &config.schedule) {
        (Some(endpoint), _) => Box::new(HttpZoneService::new(endpoint.clone())),
        (None, Some(schedule)) => Box::new(StaticZoneLookup::new(vec![ZoneMatch {
            schedule: Schedule::parse(schedule)?,
            purpose: "Configured override".to_string(),
        }])),
        (None, None) => {
            eprintln!("❌ Provide either --zoning-endpoint or --schedule");
            std::process::exit(1);
        }
    };

    let geocoder = config
        .geocode_endpoint
        .as_ref()
        .map(|endpoint| ReverseGeocodeClient::new(endpoint.clone()));

    let engine = SurveyEngine::new(zone_lookup, tables)?;
    let input = File::open(&config.coordinates)?;

    match engine
        .process(input, geocoder.as_ref().map(|g| g as &dyn ReverseGeocoder))
        .await
    {
        Ok(report) => {
            let payable = report.fees.fees().select(config.land_use);
            tracing::info!(
                "Survey fee for {} at {} sqm: {}",
                report.zone.schedule,
                report.area.sqm,
                payable
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
            println!("✅ Payable ({:?}): {}", config.land_use, payable);
        }
        Err(e) => {
            tracing::error!("Parcel processing failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
