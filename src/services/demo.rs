// src/services/demo.rs
use chrono::{Duration, NaiveDate, Utc};

use crate::models::RatePoint;
use crate::services::sources::round4;

/// Anchor close to the real USD/ILS rate so synthetic charts look plausible.
pub const DEMO_BASE_RATE: f64 = 3.09;

/// Last-resort synthetic series ending today. Every rate is a fixed function
/// of the point's index, so two calls with the same `days` are identical.
pub fn generate(days: i64) -> Vec<RatePoint> {
    let days = days.max(1);
    let start = Utc::now().date_naive() - Duration::days(days);
    generate_from(start, days)
}

/// The full formula lives here with an explicit start date: a slight linear
/// trend centred on the middle of the range plus a small 5-day ripple.
pub fn generate_from(start: NaiveDate, days: i64) -> Vec<RatePoint> {
    let days = days.max(1);
    let mut series = Vec::with_capacity(days as usize);
    for i in 0..days {
        let trend = 0.0005 * (i - days / 2) as f64;
        let ripple = 0.01 * ((i % 5) - 2) as f64 / 2.0;
        series.push(RatePoint {
            date: start + Duration::days(i),
            rate: round4(DEMO_BASE_RATE + trend + ripple),
        });
    }
    series
}
