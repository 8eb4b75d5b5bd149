// src/models.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One daily observation of the USD/ILS rate. Serialized field names match the
/// cache file layout (`{"Date": "...", "Rate": ...}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Rate")]
    pub rate: f64,
}

/// A rate point annotated with trailing simple moving averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub rate: f64,
    pub sma_7: f64,
    pub sma_14: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TradeAction {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
}

/// A full-balance conversion executed at a crossover. Append-only.
#[derive(Debug, Clone, Serialize)]
pub struct Trade {
    pub date: NaiveDate,
    pub action: TradeAction,
    pub rate: f64,
    pub amount_usd: f64,
    pub amount_nis: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BacktestReport {
    pub profit_usd: f64,
    pub profit_pct: f64,
    pub trades: Vec<Trade>,
    pub portfolio_value: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Signal {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "HOLD")]
    Hold,
}

/// The single on-disk record of the last successful fetch. Replaced wholesale
/// on every save, never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheRecord {
    pub timestamp: DateTime<Utc>,
    pub data: Vec<RatePoint>,
    pub current_rate: f64,
    pub current_date: String,
}

impl CacheRecord {
    pub fn age_hours(&self, now: DateTime<Utc>) -> f64 {
        (now - self.timestamp).num_seconds() as f64 / 3600.0
    }
}

/// Outcome of a single provider call. `None` at the call site means "try the
/// next provider", not an error.
#[derive(Debug, Clone)]
pub struct ProviderResult {
    pub rate: f64,
    pub date: String,
    pub source: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn cache_record_age_in_hours() {
        let captured = Utc.with_ymd_and_hms(2026, 2, 15, 12, 0, 0).unwrap();
        let record = CacheRecord {
            timestamp: captured,
            data: vec![],
            current_rate: 3.09,
            current_date: "2026-02-15".into(),
        };
        let now = captured + Duration::minutes(90);
        assert!((record.age_hours(now) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn rate_point_serializes_with_cache_field_names() {
        let point = RatePoint {
            date: NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
            rate: 3.0925,
        };
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"Date":"2026-02-15","Rate":3.0925}"#);

        let back: RatePoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }
}
