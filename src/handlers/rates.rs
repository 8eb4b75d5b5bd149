// src/handlers/rates.rs
use std::sync::Arc;

use log::info;
use serde_json::json;
use warp::Rejection;

use crate::services::acquirer::{RateAcquirer, HISTORY_DAYS};

use super::{resolve_days, RangeQuery};

/// Raw series endpoint: the acquirer never fails, so neither does this
/// handler once the query validates.
pub async fn get_rates(
    query: RangeQuery,
    acquirer: Arc<RateAcquirer>,
) -> Result<impl warp::Reply, Rejection> {
    info!("Handling request to get current rates");
    let days = resolve_days(&query, HISTORY_DAYS).map_err(warp::reject::custom)?;

    let (series, current_rate, status) = acquirer.acquire(days).await;
    Ok(warp::reply::json(&json!({
        "status": status,
        "current_rate": current_rate,
        "series": series,
    })))
}
