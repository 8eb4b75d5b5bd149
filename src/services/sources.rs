// src/services/sources.rs
use chrono::{Duration, Utc};
use log::{debug, error, info};
use regex::Regex;
use reqwest::Client;
use serde_json::Value;

use crate::models::{ProviderResult, RatePoint};
use crate::BoxError;

const CURRENT_TIMEOUT_SECS: u64 = 10;
const HISTORY_TIMEOUT_SECS: u64 = 15;

/// Live USD/ILS rate providers, listed in descending authority. The chain
/// decides the order; a provider only knows how to fetch and parse itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    BankOfIsrael,
    ExchangeRateHost,
    ExchangeRateApi,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::BankOfIsrael => "Bank of Israel",
            Provider::ExchangeRateHost => "ExchangeRate.host",
            Provider::ExchangeRateApi => "ExchangeRate-API",
        }
    }

    pub fn rank_label(&self) -> &'static str {
        match self {
            Provider::BankOfIsrael => "official",
            Provider::ExchangeRateHost | Provider::ExchangeRateApi => "backup",
        }
    }

    /// Fetch the latest USD/ILS rate. Transport errors, non-2xx statuses and
    /// malformed payloads all collapse to `None` here; nothing escapes the
    /// provider boundary.
    pub async fn fetch_current(&self) -> Option<ProviderResult> {
        let outcome = match self {
            Provider::BankOfIsrael => fetch_boi_current().await,
            Provider::ExchangeRateHost => fetch_host_current().await,
            Provider::ExchangeRateApi => fetch_erapi_current().await,
        };
        match outcome {
            Ok(Some(result)) => {
                debug!("{}: parsed rate {} ({})", self.name(), result.rate, result.date);
                Some(result)
            }
            Ok(None) => {
                error!("{}: no usable USD rate in payload", self.name());
                None
            }
            Err(e) => {
                error!("{} fetch error: {}", self.name(), e);
                None
            }
        }
    }

    /// Fetch a daily series covering the trailing `days` days. Only
    /// ExchangeRate.host exposes a timeseries endpoint; the other providers
    /// answer `None` so the chain moves on.
    pub async fn fetch_history(&self, days: i64) -> Option<Vec<RatePoint>> {
        match self {
            Provider::ExchangeRateHost => match fetch_host_timeseries(days).await {
                Ok(series) => series,
                Err(e) => {
                    error!("{} history fetch error: {}", self.name(), e);
                    None
                }
            },
            _ => {
                debug!("{}: no historical endpoint", self.name());
                None
            }
        }
    }
}

fn client(timeout_secs: u64) -> Result<Client, BoxError> {
    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()?;
    Ok(client)
}

async fn fetch_boi_current() -> Result<Option<ProviderResult>, BoxError> {
    let url = "https://www.boi.org.il/PublicApi/GetExchangeRates";
    info!("Fetching current rate from {}", url);

    let body = client(CURRENT_TIMEOUT_SECS)?
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(parse_boi_xml(&body))
}

async fn fetch_host_current() -> Result<Option<ProviderResult>, BoxError> {
    let url = "https://api.exchangerate.host/latest?base=USD&symbols=ILS";
    info!("Fetching current rate from {}", url);

    let body = client(CURRENT_TIMEOUT_SECS)?
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(parse_host_latest(&body))
}

async fn fetch_erapi_current() -> Result<Option<ProviderResult>, BoxError> {
    let url = "https://open.er-api.com/v6/latest/USD";
    info!("Fetching current rate from {}", url);

    let body = client(CURRENT_TIMEOUT_SECS)?
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(parse_erapi_latest(&body))
}

async fn fetch_host_timeseries(days: i64) -> Result<Option<Vec<RatePoint>>, BoxError> {
    let end = Utc::now().date_naive();
    let start = end - Duration::days(days);
    let url = format!(
        "https://api.exchangerate.host/timeseries?start_date={}&end_date={}&base=USD&symbols=ILS",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d"),
    );
    info!("Fetching historical rates from {}", url);

    let body = client(HISTORY_TIMEOUT_SECS)?
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(parse_host_timeseries(&body))
}

/// Extract the USD record from the Bank of Israel XML payload. One regex per
/// field keeps this tolerant of element order and surrounding noise.
pub fn parse_boi_xml(xml: &str) -> Option<ProviderResult> {
    let block_re = Regex::new(r"(?s)<CURRENCY>(.*?)</CURRENCY>").ok()?;
    let code_re = Regex::new(r"<CURRENCYCODE>\s*([A-Z]{3})\s*</CURRENCYCODE>").ok()?;
    let rate_re = Regex::new(r"<RATE>\s*([0-9.]+)\s*</RATE>").ok()?;
    let date_re = Regex::new(r"<LAST_UPDATE>\s*([0-9-]+)\s*</LAST_UPDATE>").ok()?;

    for block in block_re.captures_iter(xml) {
        let body = block.get(1)?.as_str();
        let code = match code_re.captures(body).and_then(|c| c.get(1)) {
            Some(m) => m.as_str(),
            None => continue,
        };
        if code != "USD" {
            continue;
        }

        let rate: f64 = rate_re.captures(body)?.get(1)?.as_str().parse().ok()?;
        if rate <= 0.0 {
            return None;
        }
        let date = date_re
            .captures(body)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());

        return Some(ProviderResult {
            rate,
            date,
            source: Provider::BankOfIsrael.name(),
        });
    }
    None
}

pub fn parse_host_latest(body: &str) -> Option<ProviderResult> {
    let v: Value = serde_json::from_str(body).ok()?;
    if !v["success"].as_bool().unwrap_or(false) {
        return None;
    }
    let rate = v["rates"]["ILS"].as_f64()?;
    if rate <= 0.0 {
        return None;
    }
    let date = v["date"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());

    Some(ProviderResult {
        rate,
        date,
        source: Provider::ExchangeRateHost.name(),
    })
}

pub fn parse_erapi_latest(body: &str) -> Option<ProviderResult> {
    let v: Value = serde_json::from_str(body).ok()?;
    let rate = v["rates"]["ILS"].as_f64()?;
    if rate <= 0.0 {
        return None;
    }
    // The endpoint reports e.g. "Sat, 15 Feb 2026 00:02:31 +0000"; keep the
    // first token as the date label, falling back to today.
    let date = v["time_last_update_utc"]
        .as_str()
        .and_then(|s| s.split_whitespace().next())
        .map(str::to_string)
        .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());

    Some(ProviderResult {
        rate,
        date,
        source: Provider::ExchangeRateApi.name(),
    })
}

/// Parse the date-keyed timeseries payload into a chronological series.
/// Rates are rounded to 4 decimals; days without a usable ILS rate are skipped.
pub fn parse_host_timeseries(body: &str) -> Option<Vec<RatePoint>> {
    let v: Value = serde_json::from_str(body).ok()?;
    if !v["success"].as_bool().unwrap_or(false) {
        return None;
    }
    let rates = v["rates"].as_object()?;

    let mut keys: Vec<&String> = rates.keys().collect();
    keys.sort();

    let mut series = Vec::with_capacity(keys.len());
    for key in keys {
        let rate = match rates[key]["ILS"].as_f64() {
            Some(r) if r > 0.0 => r,
            _ => continue,
        };
        let date: chrono::NaiveDate = match key.parse() {
            Ok(d) => d,
            Err(_) => continue,
        };
        series.push(RatePoint {
            date,
            rate: round4(rate),
        });
    }

    if series.is_empty() {
        None
    } else {
        Some(series)
    }
}

pub(crate) fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const BOI_SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<CURRENCIES>
  <LAST_UPDATE>2026-02-15</LAST_UPDATE>
  <CURRENCY>
    <NAME>Euro</NAME>
    <CURRENCYCODE>EUR</CURRENCYCODE>
    <RATE>3.3510</RATE>
    <LAST_UPDATE>2026-02-15</LAST_UPDATE>
  </CURRENCY>
  <CURRENCY>
    <NAME>Dollar</NAME>
    <CURRENCYCODE>USD</CURRENCYCODE>
    <RATE>3.0920</RATE>
    <LAST_UPDATE>2026-02-15</LAST_UPDATE>
  </CURRENCY>
</CURRENCIES>"#;

    #[test]
    fn boi_xml_picks_usd_record() {
        let result = parse_boi_xml(BOI_SAMPLE).unwrap();
        assert!((result.rate - 3.0920).abs() < 1e-9);
        assert_eq!(result.date, "2026-02-15");
        assert_eq!(result.source, "Bank of Israel");
    }

    #[test]
    fn boi_xml_without_usd_is_absent() {
        let xml = "<CURRENCIES><CURRENCY><CURRENCYCODE>EUR</CURRENCYCODE>\
                   <RATE>3.35</RATE></CURRENCY></CURRENCIES>";
        assert!(parse_boi_xml(xml).is_none());
    }

    #[test]
    fn boi_xml_garbage_is_absent() {
        assert!(parse_boi_xml("not xml at all").is_none());
        assert!(parse_boi_xml("").is_none());
    }

    #[test]
    fn host_latest_parses_success_payload() {
        let body = r#"{"success":true,"base":"USD","date":"2026-02-14","rates":{"ILS":3.0871}}"#;
        let result = parse_host_latest(body).unwrap();
        assert!((result.rate - 3.0871).abs() < 1e-9);
        assert_eq!(result.date, "2026-02-14");
        assert_eq!(result.source, "ExchangeRate.host");
    }

    #[test]
    fn host_latest_rejects_unsuccessful_payload() {
        let body = r#"{"success":false,"rates":{"ILS":3.0871}}"#;
        assert!(parse_host_latest(body).is_none());

        let body = r#"{"success":true,"rates":{"EUR":0.92}}"#;
        assert!(parse_host_latest(body).is_none());
    }

    #[test]
    fn erapi_latest_takes_first_date_token() {
        let body = r#"{"result":"success","time_last_update_utc":"Sat, 14 Feb 2026 00:02:31 +0000","rates":{"ILS":3.09}}"#;
        let result = parse_erapi_latest(body).unwrap();
        assert!((result.rate - 3.09).abs() < 1e-9);
        assert_eq!(result.date, "Sat,");
    }

    #[test]
    fn erapi_latest_missing_ils_is_absent() {
        let body = r#"{"result":"success","rates":{"EUR":0.92}}"#;
        assert!(parse_erapi_latest(body).is_none());
    }

    #[test]
    fn timeseries_sorted_ascending_with_rounding() {
        let body = r#"{"success":true,"rates":{
            "2026-02-12":{"ILS":3.091234},
            "2026-02-10":{"ILS":3.0812},
            "2026-02-11":{"ILS":3.0856}}}"#;
        let series = parse_host_timeseries(body).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());
        assert_eq!(series[2].date, NaiveDate::from_ymd_opt(2026, 2, 12).unwrap());
        assert!((series[2].rate - 3.0912).abs() < 1e-9);
    }

    #[test]
    fn timeseries_skips_days_without_ils() {
        let body = r#"{"success":true,"rates":{
            "2026-02-10":{"ILS":3.0812},
            "2026-02-11":{"EUR":0.92}}}"#;
        let series = parse_host_timeseries(body).unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn timeseries_empty_or_failed_is_absent() {
        assert!(parse_host_timeseries(r#"{"success":false,"rates":{}}"#).is_none());
        assert!(parse_host_timeseries(r#"{"success":true,"rates":{}}"#).is_none());
        assert!(parse_host_timeseries("[[[").is_none());
    }

    #[test]
    fn authority_labels() {
        assert_eq!(Provider::BankOfIsrael.rank_label(), "official");
        assert_eq!(Provider::ExchangeRateHost.rank_label(), "backup");
        assert_eq!(Provider::ExchangeRateApi.rank_label(), "backup");
    }
}
