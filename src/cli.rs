use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crypto_dashboard::config::ConfigOverrides;

#[derive(Parser)]
#[command(name = "crypto-dashboard")]
#[command(about = "Terminal dashboard for top cryptocurrency markets and their price history")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// JSON config file; built-in defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Quote currency, e.g. usd or eur
    #[arg(long)]
    pub currency: Option<String>,

    /// Number of ranked assets to list
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Lookback window of the price chart in days
    #[arg(long)]
    pub days: Option<u32>,

    /// Asset selected on start
    #[arg(short, long)]
    pub asset: Option<String>,

    /// API base URL
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive dashboard (default)
    Dashboard,

    /// Print the ranked market list and exit
    Markets,

    /// Print the price history of one asset and exit
    History {
        /// Asset id, e.g. bitcoin
        asset: String,
    },
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            quote_currency: self.currency.clone(),
            page_size: self.per_page,
            lookback_days: self.days,
            default_asset: self.asset.clone(),
            base_url: self.base_url.clone(),
        }
    }
}
