use serde::{Deserialize, Serialize};

pub mod loader;
pub mod validator;

pub use loader::{load_config, ConfigOverrides};

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_USER_AGENT: &str = "crypto-dashboard/0.1";
pub const DEFAULT_QUOTE_CURRENCY: &str = "usd";
pub const DEFAULT_ASSET: &str = "bitcoin";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Upstream API endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: String,
    /// `None` leaves requests without a deadline.
    pub request_timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<std::time::Duration> {
        self.request_timeout_secs.map(std::time::Duration::from_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: Some(10),
        }
    }
}

/// Everything the dashboard needs to know before it issues its first request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api: ApiConfig,
    pub quote_currency: String,
    pub currency_symbol: String,
    pub page_size: u32,
    pub lookback_days: u32,
    pub default_asset: String,
    pub date_format: String,
    pub clear_chart_on_error: bool,
}

impl DashboardConfig {
    pub fn builtin() -> Self {
        Self {
            api: ApiConfig::default(),
            quote_currency: DEFAULT_QUOTE_CURRENCY.to_string(),
            currency_symbol: "$".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            default_asset: DEFAULT_ASSET.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            clear_chart_on_error: false,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
