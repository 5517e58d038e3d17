use async_trait::async_trait;
use log::debug;
use reqwest::{
    header::{ACCEPT, USER_AGENT},
    Client,
};

use crate::config::ApiConfig;
use crate::error::{AppError, Context};
use crate::market::{Asset, PricePoint};

use super::decode::{decode_market_chart, decode_markets};
use super::{FetchResult, MarketChartQuery, MarketSource, MarketsQuery};

/// HTTP client for the CoinGecko v3 REST API.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl CoinGeckoClient {
    pub fn new(api: &ApiConfig) -> FetchResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = api.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .context("Failed to construct market data HTTP client")?;

        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            user_agent: api.user_agent.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_text(&self, path: &str, query: &[(&'static str, String)]) -> FetchResult<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| AppError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpStatus { status, url });
        }

        response.text().await.map_err(|source| AppError::Network { url, source })
    }
}

#[async_trait]
impl MarketSource for CoinGeckoClient {
    async fn top_assets(&self, query: &MarketsQuery) -> FetchResult<Vec<Asset>> {
        let body = self.get_text(query.path(), &query.query_pairs()).await?;
        decode_markets(&body)
    }

    async fn price_history(&self, query: &MarketChartQuery) -> FetchResult<Vec<PricePoint>> {
        let body = self.get_text(&query.path(), &query.query_pairs()).await?;
        decode_market_chart(&body)
    }
}
