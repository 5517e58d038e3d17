use chrono::format::{Item, StrftimeItems};

use crate::error::{AppError, Result};

use super::DashboardConfig;

/// Upper bound the markets endpoint accepts for `per_page`.
pub const MAX_PAGE_SIZE: u32 = 250;

/// Validate the merged configuration and surface every problem at once.
pub fn validate_config(config: &DashboardConfig) -> Result<()> {
    let mut issues = Vec::new();

    validate_api(config, &mut issues);
    validate_market_params(config, &mut issues);
    validate_presentation(config, &mut issues);

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::config(format!(
            "\n  - {}",
            issues.join("\n  - ")
        )))
    }
}

fn validate_api(config: &DashboardConfig, issues: &mut Vec<String>) {
    let base = config.api.base_url.trim();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        issues.push(format!(
            "api.base_url must be an http(s) URL, got `{}`",
            config.api.base_url
        ));
    }

    if config.api.user_agent.trim().is_empty() {
        issues.push("api.user_agent must not be empty".to_string());
    }

    if config.api.request_timeout_secs == Some(0) {
        issues.push("api.request_timeout_secs must be positive or null".to_string());
    }
}

fn validate_market_params(config: &DashboardConfig, issues: &mut Vec<String>) {
    let currency = config.quote_currency.as_str();
    if currency.is_empty() || !currency.chars().all(|c| c.is_ascii_alphanumeric()) {
        issues.push(format!(
            "quote_currency must be a non-empty alphanumeric code, got `{currency}`"
        ));
    }

    if config.page_size == 0 || config.page_size > MAX_PAGE_SIZE {
        issues.push(format!(
            "page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
            config.page_size
        ));
    }

    if config.lookback_days == 0 {
        issues.push("lookback_days must be at least 1".to_string());
    }

    if config.default_asset.trim().is_empty() {
        issues.push("default_asset must not be empty".to_string());
    }
}

fn validate_presentation(config: &DashboardConfig, issues: &mut Vec<String>) {
    if config.date_format.trim().is_empty() {
        issues.push("date_format must not be empty".to_string());
    } else if StrftimeItems::new(&config.date_format).any(|item| matches!(item, Item::Error)) {
        issues.push(format!(
            "date_format `{}` is not a valid strftime pattern",
            config.date_format
        ));
    }
}
