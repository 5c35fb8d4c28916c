use crate::config::constants::MIN_LAYOUT_PLOTS;
use crate::config::fee_tables::FeeTables;
use crate::domain::model::{LayoutQuote, Schedule};
use crate::utils::error::{Result, SurveyError};
use crate::utils::validation::parse_plot_count;

/// Plot-count-banded fee lookup for multi-plot layout applications.
pub struct LayoutFeeEngine<'a> {
    tables: &'a FeeTables,
}

impl<'a> LayoutFeeEngine<'a> {
    pub fn new(tables: &'a FeeTables) -> Self {
        Self { tables }
    }

    /// Endpoint-shaped entry over string parameters.
    pub fn quote(&self, plots: &str, schedule: &str) -> Result<LayoutQuote> {
        let plots = parse_plot_count(plots, MIN_LAYOUT_PLOTS)?;
        let schedule = Schedule::parse(schedule)?;
        self.quote_plots(plots, schedule)
    }

    pub fn quote_plots(&self, plots: u32, schedule: Schedule) -> Result<LayoutQuote> {
        if plots < MIN_LAYOUT_PLOTS {
            return Err(SurveyError::InvalidPlotCount {
                value: plots.to_string(),
                minimum: MIN_LAYOUT_PLOTS,
            });
        }

        let tiers = self.tables.layout_tiers();
        if tiers.is_empty() {
            return Err(SurveyError::NoPricingData);
        }

        let matched = match tiers.iter().find(|t| t.contains(plots)) {
            Some(tier) => tier,
            None => {
                // Every bounded bracket exhausted; report the top bracket's
                // floor so the caller can say what is actually available.
                let top_min = tiers.last().map(|t| t.min_plots).unwrap_or(0);
                return Err(SurveyError::PlotCountExceedsMaximum {
                    plots,
                    maximum_available_plots: top_min,
                });
            }
        };

        let unit_price =
            matched
                .price_for(schedule)
                .ok_or(SurveyError::SchedulePriceNotFound {
                    schedule,
                    min_plots: matched.min_plots,
                })?;

        Ok(LayoutQuote {
            plots,
            schedule,
            unit_price,
            mandatory_deposit: matched.mandatory_deposit,
            min_plots: matched.min_plots,
            max_plots: matched.max_plots,
        })
    }
}
