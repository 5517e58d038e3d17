use crate::config::DashboardConfig;
use crate::error::{AppError, Result};

/// Parameters for `GET /coins/markets`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketsQuery {
    pub vs_currency: String,
    pub per_page: u32,
    pub page: u32,
}

impl MarketsQuery {
    pub const ORDER: &'static str = "market_cap_desc";

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            vs_currency: config.quote_currency.clone(),
            per_page: config.page_size,
            page: 1,
        }
    }

    pub fn path(&self) -> &'static str {
        "/coins/markets"
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("vs_currency", self.vs_currency.clone()),
            ("order", Self::ORDER.to_string()),
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
        ]
    }
}

/// Parameters for `GET /coins/{id}/market_chart`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketChartQuery {
    pub asset_id: String,
    pub vs_currency: String,
    pub days: u32,
}

impl MarketChartQuery {
    /// Rejects an empty asset id before anything goes on the wire.
    pub fn new(asset_id: &str, config: &DashboardConfig) -> Result<Self> {
        let asset_id = asset_id.trim();
        if asset_id.is_empty() {
            return Err(AppError::message("asset id must not be empty"));
        }

        Ok(Self {
            asset_id: asset_id.to_string(),
            vs_currency: config.quote_currency.clone(),
            days: config.lookback_days,
        })
    }

    pub fn path(&self) -> String {
        format!(
            "/coins/{}/market_chart",
            urlencoding::encode(&self.asset_id)
        )
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("vs_currency", self.vs_currency.clone()),
            ("days", self.days.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markets_query_uses_fixed_order_and_first_page() {
        let query = MarketsQuery::from_config(&DashboardConfig::builtin());

        assert_eq!(query.path(), "/coins/markets");
        assert_eq!(
            query.query_pairs(),
            vec![
                ("vs_currency", "usd".to_string()),
                ("order", "market_cap_desc".to_string()),
                ("per_page", "10".to_string()),
                ("page", "1".to_string()),
            ]
        );
    }

    #[test]
    fn chart_query_carries_currency_and_lookback() {
        let mut config = DashboardConfig::builtin();
        config.quote_currency = "eur".to_string();
        config.lookback_days = 7;

        let query = MarketChartQuery::new("ethereum", &config).unwrap();

        assert_eq!(query.path(), "/coins/ethereum/market_chart");
        assert_eq!(
            query.query_pairs(),
            vec![("vs_currency", "eur".to_string()), ("days", "7".to_string())]
        );
    }

    #[test]
    fn chart_query_rejects_blank_id() {
        assert!(MarketChartQuery::new("   ", &DashboardConfig::builtin()).is_err());
    }

    #[test]
    fn chart_path_escapes_reserved_characters() {
        let query = MarketChartQuery::new("a/b c", &DashboardConfig::builtin()).unwrap();
        assert_eq!(query.path(), "/coins/a%2Fb%20c/market_chart");
    }
}
