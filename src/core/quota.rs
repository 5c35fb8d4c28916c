use crate::config::constants::SPECIAL_PILLAR_THRESHOLD;
use crate::domain::model::{BillingPeriod, PillarClass, UserQuota};
use crate::domain::ports::QuotaStore;
use crate::utils::error::{Result, SurveyError};
use chrono::NaiveDate;
use serde::Serialize;

/// Classify a pillar application by marker count. Strict greater-than: 11
/// pillars is still regular, 12 is special.
pub fn classify_pillars(pillar_count: u32) -> PillarClass {
    if pillar_count > SPECIAL_PILLAR_THRESHOLD {
        PillarClass::Special
    } else {
        PillarClass::Regular
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuotaReceipt {
    pub class: PillarClass,
    pub quota: UserQuota,
    pub remaining_quota: u32,
}

/// Tracks per-submitter application counts against the configured limit.
/// The limit is reported, not enforced; submissions above it still record.
pub struct QuotaService<S: QuotaStore> {
    store: S,
    quota_limit: u32,
}

impl<S: QuotaStore> QuotaService<S> {
    pub fn new(store: S, quota_limit: u32) -> Self {
        Self { store, quota_limit }
    }

    pub fn record(
        &self,
        user_id: &str,
        pillar_count: u32,
        application_date: NaiveDate,
    ) -> Result<QuotaReceipt> {
        if pillar_count == 0 {
            return Err(SurveyError::ValidationError {
                message: "Pillar count must be a positive integer".to_string(),
            });
        }

        let class = classify_pillars(pillar_count);
        let period = BillingPeriod::from_date(application_date);
        let quota = self
            .store
            .record_application(user_id, period, class, self.quota_limit)?;

        if quota.remaining_quota() == 0 {
            tracing::warn!(
                "Submitter {} has reached the Q{} {} quota limit of {}",
                user_id,
                period.quarter,
                period.year,
                quota.quota_limit
            );
        }

        let remaining_quota = quota.remaining_quota();
        Ok(QuotaReceipt {
            class,
            quota,
            remaining_quota,
        })
    }
}
