// src/bin/test_sources.rs
use forex_dashboard::services::chain::SourceChain;
use forex_dashboard::services::sources::Provider;

#[tokio::main]
async fn main() {
    env_logger::init();

    for provider in [
        Provider::BankOfIsrael,
        Provider::ExchangeRateHost,
        Provider::ExchangeRateApi,
    ] {
        match provider.fetch_current().await {
            Some(result) => println!(
                "{:20} {:.4} ILS/USD ({})",
                provider.name(),
                result.rate,
                result.date
            ),
            None => println!("{:20} unavailable", provider.name()),
        }
    }

    let chain = SourceChain::default();
    match chain.fetch_current().await {
        Some((result, provenance)) => {
            println!("\nChain pick: {:.4} via {}", result.rate, provenance)
        }
        None => println!("\nChain pick: all sources down"),
    }

    match chain.fetch_history(30).await {
        Some(series) => println!("History:    {} points", series.len()),
        None => println!("History:    unavailable"),
    }
}
