// src/handlers/analysis.rs
use std::sync::Arc;

use log::info;
use serde_json::json;
use warp::Rejection;

use crate::services::acquirer::{RateAcquirer, HISTORY_DAYS};
use crate::services::backtest::{self, INITIAL_USD};
use crate::services::indicators;

use super::{resolve_days, RangeQuery};

/// Full analysis endpoint: acquire the series, annotate it with moving
/// averages, run the crossover backtest and report the signal. The response
/// carries everything the chart and table renderers consume.
pub async fn get_analysis(
    query: RangeQuery,
    acquirer: Arc<RateAcquirer>,
) -> Result<impl warp::Reply, Rejection> {
    info!("Handling request to get trading analysis");
    let days = resolve_days(&query, HISTORY_DAYS).map_err(warp::reject::custom)?;

    let (series, current_rate, status) = acquirer.acquire(days).await;
    let annotated = indicators::annotate(&series);
    let report = backtest::run(&annotated, INITIAL_USD);
    let signal = backtest::signal(&annotated);
    let change_24h = backtest::change_24h_pct(&annotated);
    let win_rate = backtest::win_rate_pct(&report.trades);

    info!(
        "Analysis over {} points: signal {:?}, {} trades",
        annotated.len(),
        signal,
        report.trades.len()
    );

    Ok(warp::reply::json(&json!({
        "status": status,
        "current_rate": current_rate,
        "change_24h_pct": change_24h,
        "signal": signal,
        "initial_usd": INITIAL_USD,
        "profit_usd": report.profit_usd,
        "profit_pct": report.profit_pct,
        "win_rate_pct": win_rate,
        "trades": report.trades,
        "portfolio_value": report.portfolio_value,
        "series": annotated,
    })))
}
