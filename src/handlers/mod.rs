// src/handlers/mod.rs

pub mod analysis;
pub mod error;
pub mod rates;

use serde::Deserialize;

use self::error::ApiError;

/// Query parameters shared by the rate endpoints.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub days: Option<i64>,
}

pub(crate) const MAX_HISTORY_DAYS: i64 = 365;

/// Resolve the requested range, rejecting values the providers cannot serve.
pub(crate) fn resolve_days(query: &RangeQuery, default: i64) -> Result<i64, ApiError> {
    match query.days {
        None => Ok(default),
        Some(days) if (2..=MAX_HISTORY_DAYS).contains(&days) => Ok(days),
        Some(days) => Err(ApiError::bad_request(format!(
            "days must be between 2 and {}, got {}",
            MAX_HISTORY_DAYS, days
        ))),
    }
}
