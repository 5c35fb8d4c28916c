use crate::config::constants::{DEFAULT_QUOTA_LIMIT, LARGE_PROPERTY_THRESHOLD_SQM};
use crate::domain::model::Schedule;
use crate::utils::error::{Result, SurveyError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Statutory fee tables for both regimes, loadable from TOML so rate
/// revisions ship as configuration. `Default` carries the current gazetted
/// values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeTables {
    pub parcel: ParcelFeeTable,
    pub layout: LayoutFeeTable,
    pub quota: Option<QuotaConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParcelFeeTable {
    pub band: Vec<FeeBand>,
}

/// One area band of the parcel regime. Bands are inclusive at both ends;
/// adjacent bands share their boundary value and lookup takes the lower
/// band first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeBand {
    pub schedule: String,
    pub size_min: f64,
    pub size_max: Option<f64>,
    pub residential_fee: f64,
    pub commercial_fee: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFeeTable {
    pub tier: Vec<LayoutFeeTier>,
}

/// One plot-count bracket of the layout regime. `price` is keyed by
/// schedule letter; a missing key means no price is gazetted for that
/// schedule in this bracket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFeeTier {
    pub min_plots: u32,
    pub max_plots: Option<u32>,
    pub mandatory_deposit: f64,
    pub price: HashMap<String, f64>,
}

impl LayoutFeeTier {
    pub fn contains(&self, plots: u32) -> bool {
        plots >= self.min_plots && self.max_plots.map_or(true, |max| plots <= max)
    }

    pub fn price_for(&self, schedule: Schedule) -> Option<f64> {
        self.price.get(&schedule.letter().to_string()).copied()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    pub limit: u32,
}

impl FeeTables {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<Self> {
        let tables: FeeTables =
            toml::from_str(content).map_err(|e| SurveyError::ConfigError {
                message: format!("Failed to parse fee tables: {}", e),
            })?;
        tables.validate()?;
        Ok(tables)
    }

    /// Bands for one schedule, ascending by size_min.
    pub fn bands_for(&self, schedule: Schedule) -> Vec<&FeeBand> {
        let letter = schedule.letter().to_string();
        let mut bands: Vec<&FeeBand> = self
            .parcel
            .band
            .iter()
            .filter(|b| b.schedule.eq_ignore_ascii_case(&letter))
            .collect();
        bands.sort_by(|a, b| a.size_min.total_cmp(&b.size_min));
        bands
    }

    /// Layout tiers ascending by min_plots.
    pub fn layout_tiers(&self) -> Vec<&LayoutFeeTier> {
        let mut tiers: Vec<&LayoutFeeTier> = self.layout.tier.iter().collect();
        tiers.sort_by_key(|t| t.min_plots);
        tiers
    }

    pub fn quota_limit(&self) -> u32 {
        self.quota
            .as_ref()
            .map(|q| q.limit)
            .unwrap_or(DEFAULT_QUOTA_LIMIT)
    }
}

impl Validate for FeeTables {
    fn validate(&self) -> Result<()> {
        for schedule in [Schedule::A, Schedule::B, Schedule::C, Schedule::D] {
            let bands = self.bands_for(schedule);
            if bands.is_empty() {
                return Err(SurveyError::ConfigError {
                    message: format!("No parcel fee bands configured for {}", schedule),
                });
            }
            if bands[0].size_min != 0.0 {
                return Err(SurveyError::ConfigError {
                    message: format!("{} bands must start at 0 sqm", schedule),
                });
            }
            for pair in bands.windows(2) {
                let upper = pair[0].size_max.ok_or_else(|| SurveyError::ConfigError {
                    message: format!(
                        "{}: only the last band may be open-ended",
                        schedule
                    ),
                })?;
                if pair[1].size_min != upper {
                    return Err(SurveyError::ConfigError {
                        message: format!(
                            "{}: gap or overlap between bands at {} sqm",
                            schedule, upper
                        ),
                    });
                }
            }
            if let Some(last_max) = bands[bands.len() - 1].size_max {
                if last_max < LARGE_PROPERTY_THRESHOLD_SQM {
                    return Err(SurveyError::ConfigError {
                        message: format!(
                            "{}: bands must cover up to the {} sqm threshold",
                            schedule, LARGE_PROPERTY_THRESHOLD_SQM
                        ),
                    });
                }
            }
        }

        let tiers = self.layout_tiers();
        let mut open_ended = 0usize;
        for (i, tier) in tiers.iter().enumerate() {
            match tier.max_plots {
                Some(max) if max < tier.min_plots => {
                    return Err(SurveyError::ConfigError {
                        message: format!("Layout tier at {} plots has max below min", tier.min_plots),
                    });
                }
                None => {
                    open_ended += 1;
                    if i != tiers.len() - 1 {
                        return Err(SurveyError::ConfigError {
                            message: "Only the top layout tier may be open-ended".to_string(),
                        });
                    }
                }
                _ => {}
            }
            if i > 0 {
                let prev_max = tiers[i - 1].max_plots.unwrap_or(u32::MAX - 1);
                if tier.min_plots != prev_max.saturating_add(1) {
                    return Err(SurveyError::ConfigError {
                        message: format!(
                            "Gap or overlap between layout tiers at {} plots",
                            tier.min_plots
                        ),
                    });
                }
            }
        }
        if open_ended > 1 {
            return Err(SurveyError::ConfigError {
                message: "At most one layout tier may be open-ended".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for FeeTables {
    fn default() -> Self {
        // Gazetted bands share their structure across schedules; only the
        // fee scale differs. Commercial is twice residential throughout.
        let band_edges: [(f64, f64); 6] = [
            (0.0, 1_000.0),
            (1_000.0, 5_000.0),
            (5_000.0, 10_000.0),
            (10_000.0, 50_000.0),
            (50_000.0, 100_000.0),
            (100_000.0, 500_000.0),
        ];
        let base_residential: [f64; 6] = [
            50_000.0, 100_000.0, 150_000.0, 250_000.0, 400_000.0, 600_000.0,
        ];
        let scales = [("A", 1.0), ("B", 0.75), ("C", 0.5), ("D", 0.35)];

        let mut band = Vec::new();
        for (letter, scale) in scales {
            for (i, (lo, hi)) in band_edges.iter().enumerate() {
                let residential = base_residential[i] * scale;
                band.push(FeeBand {
                    schedule: letter.to_string(),
                    size_min: *lo,
                    size_max: Some(*hi),
                    residential_fee: residential,
                    commercial_fee: residential * 2.0,
                });
            }
        }

        let tier = vec![
            layout_tier(2, Some(10), 100_000.0, [10_000.0, 7_500.0, 5_000.0, 3_500.0]),
            layout_tier(11, Some(50), 250_000.0, [12_500.0, 9_000.0, 6_500.0, 4_500.0]),
            layout_tier(51, Some(100), 500_000.0, [15_000.0, 11_000.0, 8_000.0, 5_500.0]),
            layout_tier(101, None, 1_000_000.0, [20_000.0, 15_000.0, 10_000.0, 7_500.0]),
        ];

        Self {
            parcel: ParcelFeeTable { band },
            layout: LayoutFeeTable { tier },
            quota: Some(QuotaConfig {
                limit: DEFAULT_QUOTA_LIMIT,
            }),
        }
    }
}

fn layout_tier(
    min_plots: u32,
    max_plots: Option<u32>,
    mandatory_deposit: f64,
    prices: [f64; 4],
) -> LayoutFeeTier {
    let price = ["A", "B", "C", "D"]
        .iter()
        .zip(prices)
        .map(|(letter, value)| (letter.to_string(), value))
        .collect();
    LayoutFeeTier {
        min_plots,
        max_plots,
        mandatory_deposit,
        price,
    }
}
