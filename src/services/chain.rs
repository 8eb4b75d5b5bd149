// src/services/chain.rs
use log::{info, warn};

use crate::models::{ProviderResult, RatePoint};
use crate::services::sources::Provider;

/// Ordered list of providers, tried strictly in sequence. Descending authority
/// beats parallel racing here: the first answer must come from the most
/// trusted source that is up, and the fallback decision stays deterministic.
pub struct SourceChain {
    providers: Vec<Provider>,
}

impl SourceChain {
    pub fn new(providers: Vec<Provider>) -> Self {
        Self { providers }
    }

    /// First provider to answer wins. The provenance string
    /// `"<provider> (<rank>)"` travels with the result for the status label.
    /// All providers down is an expected outcome, reported as `None`.
    pub async fn fetch_current(&self) -> Option<(ProviderResult, String)> {
        for provider in &self.providers {
            info!("Trying current rate from {}", provider.name());
            if let Some(result) = provider.fetch_current().await {
                let provenance = format!("{} ({})", provider.name(), provider.rank_label());
                info!("Current rate {} via {}", result.rate, provenance);
                return Some((result, provenance));
            }
        }
        warn!("All current-rate providers unavailable");
        None
    }

    pub async fn fetch_history(&self, days: i64) -> Option<Vec<RatePoint>> {
        for provider in &self.providers {
            if let Some(series) = provider.fetch_history(days).await {
                if !series.is_empty() {
                    info!("{} historical points via {}", series.len(), provider.name());
                    return Some(series);
                }
            }
        }
        warn!("No provider returned historical data");
        None
    }
}

impl Default for SourceChain {
    fn default() -> Self {
        Self::new(vec![
            Provider::BankOfIsrael,
            Provider::ExchangeRateHost,
            Provider::ExchangeRateApi,
        ])
    }
}
