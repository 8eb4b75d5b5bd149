// src/services/backtest.rs
use log::info;

use crate::models::{BacktestReport, IndicatorPoint, Signal, Trade, TradeAction};

pub const INITIAL_USD: f64 = 1000.0;

/// Moving-average-crossover backtest. Two states per run: holding USD
/// (initial) or holding NIS, with full-balance conversion on each crossover.
///
/// The boundary policy is asymmetric on the prior point (`<=` for BUY, `>=`
/// for SELL): a touch followed by a strict break counts as a crossover, a
/// plain equality never does.
pub fn run(series: &[IndicatorPoint], initial_usd: f64) -> BacktestReport {
    let mut usd_balance = initial_usd;
    let mut nis_balance = 0.0;
    let mut trades: Vec<Trade> = Vec::new();
    let mut portfolio_value = Vec::with_capacity(series.len());

    for (i, point) in series.iter().enumerate() {
        if i > 0 {
            let prev = &series[i - 1];

            if point.sma_7 > point.sma_14 && prev.sma_7 <= prev.sma_14 && usd_balance > 0.0 {
                nis_balance = usd_balance * point.rate;
                trades.push(Trade {
                    date: point.date,
                    action: TradeAction::Buy,
                    rate: point.rate,
                    amount_usd: usd_balance,
                    amount_nis: nis_balance,
                });
                usd_balance = 0.0;
            } else if point.sma_7 < point.sma_14 && prev.sma_7 >= prev.sma_14 && nis_balance > 0.0
            {
                usd_balance = nis_balance / point.rate;
                trades.push(Trade {
                    date: point.date,
                    action: TradeAction::Sell,
                    rate: point.rate,
                    amount_usd: usd_balance,
                    amount_nis: nis_balance,
                });
                nis_balance = 0.0;
            }
        }

        // Mark-to-market in USD at every index, trade or not.
        portfolio_value.push(usd_balance + nis_balance / point.rate);
    }

    let final_usd = match series.last() {
        Some(last) => usd_balance + nis_balance / last.rate,
        None => usd_balance,
    };
    let profit_usd = final_usd - initial_usd;
    let profit_pct = profit_usd / initial_usd * 100.0;
    info!(
        "Backtest: {} trades, profit {:.2} USD ({:+.2}%)",
        trades.len(),
        profit_usd,
        profit_pct
    );

    BacktestReport {
        profit_usd,
        profit_pct,
        trades,
        portfolio_value,
    }
}

/// Current recommendation from the latest short/long MA relationship.
pub fn signal(series: &[IndicatorPoint]) -> Signal {
    match series.last() {
        Some(last) if last.sma_7 > last.sma_14 => Signal::Buy,
        Some(last) if last.sma_7 < last.sma_14 => Signal::Sell,
        _ => Signal::Hold,
    }
}

/// Percent change between the last two closes; zero with fewer than 2 points.
pub fn change_24h_pct(series: &[IndicatorPoint]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let prev = series[series.len() - 2].rate;
    let last = series[series.len() - 1].rate;
    (last - prev) / prev * 100.0
}

/// Completed round trips (SELLs) over all trades.
pub fn win_rate_pct(trades: &[Trade]) -> f64 {
    let sells = trades
        .iter()
        .filter(|t| t.action == TradeAction::Sell)
        .count();
    sells as f64 / trades.len().max(1) as f64 * 100.0
}
