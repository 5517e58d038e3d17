use async_trait::async_trait;

use crate::error::Result;
use crate::market::{Asset, PricePoint};

pub mod coingecko;
pub mod decode;
pub mod request;

pub use coingecko::CoinGeckoClient;
pub use request::{MarketChartQuery, MarketsQuery};

pub type FetchResult<T> = Result<T>;

/// Read-only access to ranked markets and per-asset price history.
#[async_trait]
pub trait MarketSource: Send + Sync {
    async fn top_assets(&self, query: &MarketsQuery) -> FetchResult<Vec<Asset>>;

    async fn price_history(&self, query: &MarketChartQuery) -> FetchResult<Vec<PricePoint>>;
}
