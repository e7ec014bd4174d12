//! DEX Dashboard - Main Entry Point
//!
//! Terminal dashboard for pair liquidity, volume and fee APR

use dex_dashboard::*;
use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time;
use tracing::{info, warn, error};
use crate::controller::{Command, CommandAction, ControllerSettings, PageController, RefreshOutcome};
use crate::network::{AllowList, HttpPairsClient, HttpPriceOracle, PairsSource, PriceOracle, RetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    utils::setup_output_directories()?;
    let _logging_guard = utils::setup_logging()?;

    // Load configuration
    let config = CONFIG.clone();

    info!("📊 DEX Dashboard v{}", env!("CARGO_PKG_VERSION"));
    info!("📋 Configuration:");
    info!("   API: {}", config.api_base_url);
    info!("   Price Denomination: {:?}", config.price_denomination);
    info!(
        "   Price Oracle: {}",
        config.price_oracle_url.as_deref().unwrap_or("disabled")
    );
    info!(
        "   Allow-list: {}",
        if config.allowed_tokens.is_empty() {
            "all tokens".to_string()
        } else {
            format!("{} tokens", config.allowed_tokens.len())
        }
    );
    info!("   Page Size: {}", config.page_size);
    info!(
        "   Fetch: {}s timeout, {} attempts",
        config.fetch_timeout_secs, config.fetch_max_attempts
    );
    match config.refresh_interval() {
        Some(interval) => info!("   Refresh Interval: {:?}", interval),
        None => info!("   Refresh Interval: manual only"),
    }

    let retry = RetryConfig::from(&config);
    let pairs_source: Arc<dyn PairsSource> =
        Arc::new(HttpPairsClient::new(&config.api_base_url, retry.clone())?);
    let oracle: Option<Arc<dyn PriceOracle>> = match &config.price_oracle_url {
        Some(url) => Some(Arc::new(HttpPriceOracle::new(
            url,
            &config.price_oracle_pointer,
            retry,
        )?)),
        None => None,
    };

    let mut controller = PageController::new(
        pairs_source,
        oracle,
        AllowList::from_addresses(&config.allowed_tokens),
        ControllerSettings::from(&config),
    )?;

    let start_time = Instant::now();
    let mut refreshes: u64 = 0;

    run_refresh(&mut controller, &mut refreshes).await;
    println!("{}", controller.render(config.display_width));
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut interval = config.refresh_interval().map(|period| {
        let mut interval = time::interval_at(time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
        interval
    });

    loop {
        tokio::select! {
            _ = tick(&mut interval) => {
                controller.invalidate();
                run_refresh(&mut controller, &mut refreshes).await;
                println!("{}", controller.render(config.display_width));
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        info!("stdin closed, exiting...");
                        break;
                    }
                    Err(e) => {
                        error!("Failed to read command: {}", e);
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }

                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(e) => {
                        warn!("{}", e);
                        println!("{}", controller.help());
                        continue;
                    }
                };

                match controller.apply(command) {
                    CommandAction::Render => {
                        println!("{}", controller.render(config.display_width));
                    }
                    CommandAction::Refresh => {
                        run_refresh(&mut controller, &mut refreshes).await;
                        println!("{}", controller.render(config.display_width));
                    }
                    CommandAction::ShowHelp => println!("{}", controller.help()),
                    CommandAction::Quit => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("\n📛 Received shutdown signal (Ctrl+C)...");
                break;
            }
        }
    }

    info!("🛑 Shutting down after {:?} ({} refreshes)", start_time.elapsed(), refreshes);

    Ok(())
}

/// Waits for the next refresh tick, or forever when periodic refresh is off.
async fn tick(interval: &mut Option<time::Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

async fn run_refresh(controller: &mut PageController, refreshes: &mut u64) {
    match controller.refresh().await {
        RefreshOutcome::Updated => *refreshes += 1,
        RefreshOutcome::Skipped => {}
        RefreshOutcome::Failed => {
            warn!(
                "Refresh failed ({} in a row), showing last known data",
                controller.consecutive_failures()
            );
        }
    }
}
