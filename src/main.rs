mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Commands};
use crypto_dashboard::app::{bootstrap, report};
use crypto_dashboard::config::load_config;
use crypto_dashboard::utils::current_human_timestamp;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), &cli.overrides())
        .context("Failed to load configuration")?;

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => {
            bootstrap::run(config).await?;
        }
        Commands::Markets => {
            let source = bootstrap::coingecko_source(&config)?;
            let assets = bootstrap::load_markets(&config, source.as_ref())
                .await
                .context("Failed to fetch market list")?;
            println!("# {}", current_human_timestamp());
            print!("{}", report::render_market_list(&assets, &config.quote_currency));
        }
        Commands::History { asset } => {
            let source = bootstrap::coingecko_source(&config)?;
            let series = bootstrap::load_series(&config, source.as_ref(), &asset)
                .await
                .with_context(|| format!("Failed to fetch price history for {asset}"))?;
            println!("# {}", current_human_timestamp());
            print!("{}", report::render_series_table(&series, &config.currency_symbol));
        }
    }

    Ok(())
}
