// src/services/indicators.rs
use crate::models::{IndicatorPoint, RatePoint};

pub const SHORT_WINDOW: usize = 7;
pub const LONG_WINDOW: usize = 14;

/// Annotate each point with trailing simple moving averages. Windows truncate
/// at the series start rather than padding, so early points average over
/// however much history exists. No look-ahead.
pub fn annotate(series: &[RatePoint]) -> Vec<IndicatorPoint> {
    series
        .iter()
        .enumerate()
        .map(|(i, point)| IndicatorPoint {
            date: point.date,
            rate: point.rate,
            sma_7: trailing_mean(series, i, SHORT_WINDOW),
            sma_14: trailing_mean(series, i, LONG_WINDOW),
        })
        .collect()
}

fn trailing_mean(series: &[RatePoint], i: usize, window: usize) -> f64 {
    let start = (i + 1).saturating_sub(window);
    let slice = &series[start..=i];
    slice.iter().map(|p| p.rate).sum::<f64>() / slice.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn series(rates: &[f64]) -> Vec<RatePoint> {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        rates
            .iter()
            .enumerate()
            .map(|(i, &rate)| RatePoint {
                date: start + Duration::days(i as i64),
                rate,
            })
            .collect()
    }

    fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    #[test]
    fn output_length_matches_input() {
        for n in [1usize, 5, 14, 40] {
            let rates: Vec<f64> = (1..=n).map(|v| v as f64).collect();
            assert_eq!(annotate(&series(&rates)).len(), n);
        }
    }

    #[test]
    fn window_boundaries() {
        // 1..=20 makes expected means easy to state per window size.
        let rates: Vec<f64> = (1..=20).map(|v| v as f64).collect();
        let annotated = annotate(&series(&rates));

        // Window of 1: just the first point.
        assert!((annotated[0].sma_7 - 1.0).abs() < 1e-9);
        assert!((annotated[0].sma_14 - 1.0).abs() < 1e-9);

        // Window of 6: short MA still truncated.
        assert!((annotated[5].sma_7 - mean(&rates[0..6])).abs() < 1e-9);

        // Window of 7: short MA exactly full.
        assert!((annotated[6].sma_7 - mean(&rates[0..7])).abs() < 1e-9);

        // Window of 13: long MA still truncated.
        assert!((annotated[12].sma_14 - mean(&rates[0..13])).abs() < 1e-9);

        // Window of 14: long MA exactly full.
        assert!((annotated[13].sma_14 - mean(&rates[0..14])).abs() < 1e-9);

        // Window of 15: both MAs slide, dropping the oldest point.
        assert!((annotated[14].sma_7 - mean(&rates[8..15])).abs() < 1e-9);
        assert!((annotated[14].sma_14 - mean(&rates[1..15])).abs() < 1e-9);
    }

    #[test]
    fn truncated_windows_are_equal_early_on() {
        // Before point 7 both windows cover the same prefix, so the MAs agree.
        let rates = [3.00, 3.05, 3.10, 3.02, 2.95];
        let annotated = annotate(&series(&rates));
        for point in &annotated {
            assert!((point.sma_7 - point.sma_14).abs() < 1e-12);
        }
        assert!((annotated[4].sma_7 - 3.024).abs() < 1e-9);
        assert!((annotated[4].sma_14 - 3.024).abs() < 1e-9);
    }

    #[test]
    fn carries_date_and_rate_through() {
        let rates = [3.1, 3.2];
        let annotated = annotate(&series(&rates));
        assert_eq!(annotated[1].date, NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
        assert!((annotated[1].rate - 3.2).abs() < 1e-9);
    }
}
