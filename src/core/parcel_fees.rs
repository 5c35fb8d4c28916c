use crate::config::constants::{
    excess_rate_per_hectare, LARGE_PROPERTY_THRESHOLD_SQM, SQM_PER_HECTARE,
};
use crate::config::fee_tables::FeeTables;
use crate::domain::model::{FeePair, FeeResult, Schedule};
use crate::utils::error::{Result, SurveyError};
use crate::utils::validation::parse_area;

/// Area-banded fee lookup for single-parcel (pillar) applications.
pub struct ParcelFeeEngine<'a> {
    tables: &'a FeeTables,
}

impl<'a> ParcelFeeEngine<'a> {
    pub fn new(tables: &'a FeeTables) -> Self {
        Self { tables }
    }

    /// Endpoint-shaped entry: both inputs arrive as strings and are
    /// validated here, never silently defaulted.
    pub fn quote(&self, area: &str, schedule: &str) -> Result<FeeResult> {
        let area = parse_area(area)?;
        let schedule = Schedule::parse(schedule)?;
        self.quote_area(area, schedule)
    }

    pub fn quote_area(&self, area_sqm: f64, schedule: Schedule) -> Result<FeeResult> {
        if area_sqm > LARGE_PROPERTY_THRESHOLD_SQM {
            self.calculated_quote(area_sqm, schedule)
        } else {
            self.direct_quote(area_sqm, schedule)
        }
    }

    /// Direct table lookup: first band containing the area, inclusive at
    /// both ends.
    fn direct_quote(&self, area_sqm: f64, schedule: Schedule) -> Result<FeeResult> {
        let band = self
            .tables
            .bands_for(schedule)
            .into_iter()
            .find(|b| {
                area_sqm >= b.size_min && b.size_max.map_or(true, |max| area_sqm <= max)
            })
            .ok_or(SurveyError::NoFeeBand {
                schedule,
                area_sqm,
            })?;

        Ok(FeeResult::Direct {
            schedule,
            size_min: band.size_min,
            size_max: band.size_max.unwrap_or(LARGE_PROPERTY_THRESHOLD_SQM),
            fees: FeePair {
                residential: band.residential_fee,
                commercial: band.commercial_fee,
            },
        })
    }

    /// Large-property branch: base fee from the last fully-specified band,
    /// plus the per-hectare excess rate, rounded to whole currency units.
    fn calculated_quote(&self, area_sqm: f64, schedule: Schedule) -> Result<FeeResult> {
        let (base_max, base_band) = self
            .tables
            .bands_for(schedule)
            .into_iter()
            .filter_map(|b| {
                b.size_max
                    .filter(|max| *max <= LARGE_PROPERTY_THRESHOLD_SQM)
                    .map(|max| (max, b))
            })
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .ok_or(SurveyError::NoFeeBand {
                schedule,
                area_sqm,
            })?;

        let base_fee = FeePair {
            residential: base_band.residential_fee,
            commercial: base_band.commercial_fee,
        };
        let additional_hectares = (area_sqm - LARGE_PROPERTY_THRESHOLD_SQM) / SQM_PER_HECTARE;
        let rate = excess_rate_per_hectare(schedule);

        let fees = FeePair {
            residential: (base_fee.residential + rate.residential * additional_hectares).round(),
            commercial: (base_fee.commercial + rate.commercial * additional_hectares).round(),
        };

        Ok(FeeResult::Calculated {
            schedule,
            base_size_min: base_band.size_min,
            base_size_max: base_max,
            base_fee,
            additional_hectares,
            additional_rate: rate,
            fees,
        })
    }
}
