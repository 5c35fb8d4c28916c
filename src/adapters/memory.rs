use crate::domain::model::{BillingPeriod, GeoPolygon, PillarClass, UserQuota, ZoneMatch};
use crate::domain::ports::{QuotaStore, ZoneLookup};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Quota counters held in process memory. The read-modify-write happens
/// under one lock, so concurrent applications by the same submitter cannot
/// lose an increment; a database-backed store would use a transaction for
/// the same guarantee.
#[derive(Debug, Default)]
pub struct InMemoryQuotaStore {
    records: Mutex<HashMap<(String, u8, i32), UserQuota>>,
}

impl InMemoryQuotaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuotaStore for InMemoryQuotaStore {
    fn record_application(
        &self,
        user_id: &str,
        period: BillingPeriod,
        class: PillarClass,
        quota_limit: u32,
    ) -> Result<UserQuota> {
        let mut records = self.records.lock().expect("quota store lock poisoned");
        let record = records
            .entry((user_id.to_string(), period.quarter, period.year))
            .or_insert_with(|| UserQuota {
                user_id: user_id.to_string(),
                quarter: period.quarter,
                year: period.year,
                regular_pillars_applied: 0,
                special_pillars_applied: 0,
                quota_limit,
            });

        match class {
            PillarClass::Regular => record.regular_pillars_applied += 1,
            PillarClass::Special => record.special_pillars_applied += 1,
        }

        Ok(record.clone())
    }

    fn get(&self, user_id: &str, period: BillingPeriod) -> Result<Option<UserQuota>> {
        let records = self.records.lock().expect("quota store lock poisoned");
        Ok(records
            .get(&(user_id.to_string(), period.quarter, period.year))
            .cloned())
    }
}

/// Zone lookup answering from a fixed table. Used by the CLI's offline mode
/// and as a test double where an HTTP zoning service would be overkill.
#[derive(Debug, Clone)]
pub struct StaticZoneLookup {
    matches: Vec<ZoneMatch>,
}

impl StaticZoneLookup {
    pub fn new(matches: Vec<ZoneMatch>) -> Self {
        Self { matches }
    }
}

#[async_trait]
impl ZoneLookup for StaticZoneLookup {
    async fn zones_containing(&self, _polygon: &GeoPolygon) -> Result<Vec<ZoneMatch>> {
        Ok(self.matches.clone())
    }
}
