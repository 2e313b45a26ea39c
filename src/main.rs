mod config;
mod error;
mod poller;
mod post;
mod quote;
#[cfg(test)]
mod testing;
mod util;

use anyhow::Result;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use util::sanitize::for_display;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    // Minimal CLI: optional --config <path>, --once
    let mut args = env::args().skip(1);
    let mut config_override: Option<String> = None;
    let mut once = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if let Some(p) = args.next() {
                    config_override = Some(p);
                }
            }
            "--once" => once = true,
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            _ => {}
        }
    }

    let cfg = config::load(config_override)?;
    info!(
        source = %cfg.source_url,
        destination = %cfg.destination_url,
        interval_secs = cfg.interval.as_secs(),
        "quote-poster starting"
    );
    let poller = poller::Poller::new(cfg)?;

    if once {
        let report = poller.run_cycle().await?;
        info!(
            status = %report.status,
            latitude = report.query.latitude,
            longitude = report.query.longitude,
            title = %for_display(&report.payload.title),
            "single cycle done"
        );
        return Ok(());
    }

    poller.run(shutdown_signal()).await?;
    info!("stopped");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("quote_poster=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the loop runs until the process is killed.
        error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

fn print_help() {
    println!("quote-poster");
    println!("Usage: quote-poster [--config <path>] [--once]");
    println!("  --config <path>   Path to a config.toml");
    println!("                    (defaults to ~/.config/quote-poster/config.toml)");
    println!("  --once            Publish a single quote and exit");
}
