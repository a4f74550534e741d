//! Per-company `CompanySettings` TTL cache (spec §5: "Settings reads are
//! hot and may be cached per company for up to one minute"; SPEC_FULL §11).
//!
//! Advisory only: the cache is invalidated on write, never relied on for
//! correctness of the one-open-session or one-pending invariants.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::common::entity_ids::CompanyId;

use super::models::CompanySettings;

const TTL: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct SettingsCache {
    inner: Arc<RwLock<HashMap<CompanyId, (Instant, CompanySettings)>>>,
}

impl SettingsCache {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Fetch settings for `company_id`, serving a fresh cache entry if one
    /// exists, otherwise reading through to storage and repopulating it.
    pub async fn get(&self, company_id: CompanyId, pool: &PgPool) -> anyhow::Result<Option<CompanySettings>> {
        if let Some((fetched_at, settings)) = self.inner.read().await.get(&company_id) {
            if fetched_at.elapsed() < TTL {
                return Ok(Some(settings.clone()));
            }
        }

        let settings = CompanySettings::find_by_company(company_id, pool).await?;
        if let Some(ref settings) = settings {
            self.inner
                .write()
                .await
                .insert(company_id, (Instant::now(), settings.clone()));
        }
        Ok(settings)
    }

    /// Invalidate the cached entry for `company_id` (call from any settings write path).
    pub async fn invalidate(&self, company_id: CompanyId) {
        self.inner.write().await.remove(&company_id);
    }
}

impl Default for SettingsCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalidate_removes_entry() {
        let cache = SettingsCache::new();
        let company_id = CompanyId::new();
        cache.inner.write().await.insert(
            company_id,
            (
                Instant::now(),
                CompanySettings {
                    id: crate::common::entity_ids::CompanySettingsId::new(),
                    company_id,
                    auto_checkout_enabled: true,
                    auto_checkout_after_seconds: 900,
                    verify_outside_with_n_readings: 3,
                    workdays_per_month: 26,
                    currency: "SAR".to_string(),
                    insurance_type: super::super::models::InsuranceTaxKind::Percentage,
                    insurance_value: rust_decimal::Decimal::new(10, 2),
                    tax_type: super::super::models::InsuranceTaxKind::Percentage,
                    tax_value: rust_decimal::Decimal::new(5, 2),
                    overtime_multiplier: rust_decimal::Decimal::new(15, 1),
                    shift_hours_per_day: rust_decimal::Decimal::new(8, 0),
                    grace_minutes: 15,
                    weekly_off_days: vec![5, 6],
                },
            ),
        );
        assert!(cache.inner.read().await.contains_key(&company_id));
        cache.invalidate(company_id).await;
        assert!(!cache.inner.read().await.contains_key(&company_id));
    }
}
