use crate::domain::model::{BillingPeriod, GeoPolygon, PillarClass, UserQuota, ZoneMatch};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Spatial zoning collaborator: polygon containment/intersection query
/// against the zoning dataset. Rows come back in the collaborator's order;
/// the classifier takes the first.
#[async_trait]
pub trait ZoneLookup: Send + Sync {
    async fn zones_containing(&self, polygon: &GeoPolygon) -> Result<Vec<ZoneMatch>>;
}

#[async_trait]
impl ZoneLookup for Box<dyn ZoneLookup> {
    async fn zones_containing(&self, polygon: &GeoPolygon) -> Result<Vec<ZoneMatch>> {
        (**self).zones_containing(polygon).await
    }
}

/// Reverse-geocoding collaborator. Context enrichment only; callers must
/// treat failure as non-fatal.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn locate(&self, latitude: f64, longitude: f64) -> Result<Option<String>>;
}

/// Storage for per-submitter, per-period pillar counters. Implementations
/// must make the read-modify-write atomic; two concurrent applications by
/// the same submitter may not lose an increment.
pub trait QuotaStore: Send + Sync {
    fn record_application(
        &self,
        user_id: &str,
        period: BillingPeriod,
        class: PillarClass,
        quota_limit: u32,
    ) -> Result<UserQuota>;

    fn get(&self, user_id: &str, period: BillingPeriod) -> Result<Option<UserQuota>>;
}
