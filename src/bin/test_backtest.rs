// src/bin/test_backtest.rs
use forex_dashboard::services::acquirer::{RateAcquirer, HISTORY_DAYS};
use forex_dashboard::services::backtest::{self, INITIAL_USD};
use forex_dashboard::services::cache::{RateCache, CACHE_FILE};
use forex_dashboard::services::chain::SourceChain;
use forex_dashboard::services::indicators;

#[tokio::main]
async fn main() {
    env_logger::init();

    let acquirer = RateAcquirer::new(SourceChain::default(), RateCache::new(CACHE_FILE));
    let (series, current_rate, status) = acquirer.acquire(HISTORY_DAYS).await;
    println!("Status:       {}", status);
    println!("Current rate: {:.4} ILS/USD", current_rate);
    println!("Series:       {} points", series.len());

    let annotated = indicators::annotate(&series);
    let report = backtest::run(&annotated, INITIAL_USD);
    println!("Signal:       {:?}", backtest::signal(&annotated));
    println!(
        "Backtest:     {:+.2} USD ({:+.2}%), {} trades",
        report.profit_usd,
        report.profit_pct,
        report.trades.len()
    );
    for trade in &report.trades {
        println!(
            "  {:?} on {} at {:.4} ({:.2} USD / {:.2} NIS)",
            trade.action, trade.date, trade.rate, trade.amount_usd, trade.amount_nis
        );
    }
}
