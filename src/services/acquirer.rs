// src/services/acquirer.rs
use chrono::Utc;
use log::{info, warn};

use crate::models::{CacheRecord, RatePoint};
use crate::services::cache::RateCache;
use crate::services::chain::SourceChain;
use crate::services::demo;

pub const HISTORY_DAYS: i64 = 30;

/// Three-tier acquisition: live source chain, then the cache, then synthetic
/// data. Never fails outward; the status label names the tier that answered.
pub struct RateAcquirer {
    chain: SourceChain,
    cache: RateCache,
}

impl RateAcquirer {
    pub fn new(chain: SourceChain, cache: RateCache) -> Self {
        Self { chain, cache }
    }

    pub async fn acquire(&self, days: i64) -> (Vec<RatePoint>, f64, String) {
        if let Some(series) = self.chain.fetch_history(days).await {
            let last = series[series.len() - 1];
            let (current_rate, current_date, status) = match self.chain.fetch_current().await {
                Some((result, provenance)) => (result.rate, result.date, provenance),
                None => (
                    last.rate,
                    last.date.to_string(),
                    "Historical data only (no live rate)".to_string(),
                ),
            };

            let record = CacheRecord {
                timestamp: Utc::now(),
                data: series.clone(),
                current_rate,
                current_date,
            };
            if let Err(e) = self.cache.save(&record) {
                warn!("Failed to persist rate cache: {}", e);
            }
            return (series, current_rate, status);
        }

        warn!("Live fetch failed, falling back to cache");
        if let Some(record) = self.cache.load() {
            let status = format!(
                "Using cached data ({:.1} hours old)",
                record.age_hours(Utc::now())
            );
            info!("{}", status);
            return (record.data, record.current_rate, status);
        }

        warn!("Cache unavailable, falling back to synthetic data");
        let series = demo::generate(days);
        let current_rate = series[series.len() - 1].rate;
        (series, current_rate, "Demo mode (synthetic rates)".to_string())
    }
}
