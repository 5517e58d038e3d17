use std::sync::Arc;

use chrono::Local;

use crate::app::controller::AppController;
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::fetch::{CoinGeckoClient, MarketChartQuery, MarketSource, MarketsQuery};
use crate::market::{Asset, PriceSeries};

/// Entry point used by `main` for the interactive dashboard.
pub async fn run(config: DashboardConfig) -> Result<()> {
    let source = coingecko_source(&config)?;
    AppController::new(config, source).run().await
}

/// One-shot market list fetch, outside the dashboard state machine.
pub async fn load_markets(config: &DashboardConfig, source: &dyn MarketSource) -> Result<Vec<Asset>> {
    source.top_assets(&MarketsQuery::from_config(config)).await
}

/// Fetch one asset's series directly; the asset does not need to be in the ranked list.
pub async fn load_series(
    config: &DashboardConfig,
    source: &dyn MarketSource,
    asset_id: &str,
) -> Result<PriceSeries> {
    let query = MarketChartQuery::new(asset_id, config)?;
    let points = source.price_history(&query).await?;
    PriceSeries::from_points(&query.asset_id, &points, &Local, &config.date_format)
}

pub fn coingecko_source(config: &DashboardConfig) -> Result<Arc<dyn MarketSource>> {
    Ok(Arc::new(CoinGeckoClient::new(&config.api)?))
}
