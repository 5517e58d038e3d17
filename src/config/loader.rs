use std::{fs, path::Path};

use log::debug;

use crate::error::{Context, Result};

use super::{validator, DashboardConfig};

/// Values supplied on the command line; each one wins over the file and the defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub quote_currency: Option<String>,
    pub page_size: Option<u32>,
    pub lookback_days: Option<u32>,
    pub default_asset: Option<String>,
    pub base_url: Option<String>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut DashboardConfig) {
        if let Some(currency) = &self.quote_currency {
            config.quote_currency = currency.clone();
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(days) = self.lookback_days {
            config.lookback_days = days;
        }
        if let Some(asset) = &self.default_asset {
            config.default_asset = asset.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.trim().to_string();
        }
    }
}

/// Build the effective configuration: built-in defaults, then the optional JSON file,
/// then command-line overrides. The merged result is validated before it is returned.
pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<DashboardConfig> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => DashboardConfig::builtin(),
    };

    overrides.apply(&mut config);
    normalize(&mut config);

    validator::validate_config(&config)?;
    Ok(config)
}

/// Same spelling rules whether a value came from the file or the command line.
fn normalize(config: &mut DashboardConfig) {
    config.quote_currency = config.quote_currency.trim().to_lowercase();
    config.default_asset = config.default_asset.trim().to_string();
    config.api.base_url = config.api.base_url.trim().trim_end_matches('/').to_string();
}

fn read_config_file(path: &Path) -> Result<DashboardConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;

    let config: DashboardConfig = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;

    debug!("loaded dashboard config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_config(name: &str, body: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "crypto-dashboard-{}-{}.json",
            name,
            std::process::id()
        ));
        let mut file = fs::File::create(&path).expect("create temp config");
        file.write_all(body.as_bytes()).expect("write temp config");
        path
    }

    #[test]
    fn defaults_without_file_or_overrides() {
        let config = load_config(None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config, DashboardConfig::builtin());
    }

    #[test]
    fn file_values_override_defaults() {
        let path = write_temp_config(
            "file",
            r#"{ "quote_currency": "eur", "currency_symbol": "€", "page_size": 25 }"#,
        );

        let config = load_config(Some(&path), &ConfigOverrides::default()).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.quote_currency, "eur");
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.lookback_days, 30);
        assert_eq!(config.api.base_url, crate::config::DEFAULT_BASE_URL);
    }

    #[test]
    fn overrides_win_over_file() {
        let path = write_temp_config(
            "overrides",
            r#"{ "page_size": 25, "api": { "base_url": "http://localhost:9000/api/" } }"#,
        );
        let overrides = ConfigOverrides {
            page_size: Some(5),
            quote_currency: Some(" GBP ".to_string()),
            ..ConfigOverrides::default()
        };

        let config = load_config(Some(&path), &overrides).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.page_size, 5);
        assert_eq!(config.quote_currency, "gbp");
        assert_eq!(config.api.base_url, "http://localhost:9000/api");
        assert_eq!(config.api.user_agent, crate::config::DEFAULT_USER_AGENT);
    }

    #[test]
    fn file_values_are_normalized_like_overrides() {
        let path = write_temp_config(
            "normalize",
            r#"{ "quote_currency": " EUR ", "default_asset": " ethereum " }"#,
        );

        let config = load_config(Some(&path), &ConfigOverrides::default()).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.quote_currency, "eur");
        assert_eq!(config.default_asset, "ethereum");
    }

    #[test]
    fn invalid_merged_config_is_rejected() {
        let overrides = ConfigOverrides {
            lookback_days: Some(0),
            ..ConfigOverrides::default()
        };

        let err = load_config(None, &overrides).expect_err("zero lookback should fail");
        assert!(err.to_string().contains("lookback_days"), "{err}");
    }

    #[test]
    fn unreadable_file_reports_path() {
        let path = Path::new("/definitely/not/here/dashboard.json");
        let err = load_config(Some(path), &ConfigOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("dashboard.json"), "{err}");
    }
}
