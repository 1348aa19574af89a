use tracing::debug;

use crate::{Error, Period, Result};

/// Runtime configuration loaded from environment variables at startup.
/// Every variable is optional; unset ones fall back to the defaults below.
#[derive(Debug, Clone)]
pub struct Config {
    // HTTP API
    pub api_port: u16,

    // Market data
    pub yahoo_base_url: String,
    pub http_timeout_secs: u64,

    // Analysis
    pub default_period: Period,

    /// Optional TOML file overriding indicator parameters.
    pub indicator_config_path: Option<String>,
}

impl Config {
    pub const DEFAULT_YAHOO_BASE_URL: &'static str = "https://query2.finance.yahoo.com";

    /// Load configuration from environment variables.
    /// Loads `.env` if present. Fails on values that are set but unparseable.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env");
        }

        let default_period = match optional_env("DEFAULT_PERIOD") {
            Some(raw) => raw.parse::<Period>()?,
            None => Period::default(),
        };

        Ok(Config {
            api_port: parsed_env("API_PORT")?.unwrap_or(8080),
            yahoo_base_url: optional_env("YAHOO_BASE_URL")
                .unwrap_or_else(|| Self::DEFAULT_YAHOO_BASE_URL.to_string()),
            http_timeout_secs: parsed_env("HTTP_TIMEOUT_SECS")?.unwrap_or(30),
            default_period,
            indicator_config_path: optional_env("INDICATOR_CONFIG_PATH"),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_port: 8080,
            yahoo_base_url: Self::DEFAULT_YAHOO_BASE_URL.to_string(),
            http_timeout_secs: 30,
            default_period: Period::default(),
            indicator_config_path: None,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    optional_env(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|_| Error::Config(format!("{key} has invalid value '{raw}'")))
        })
        .transpose()
}
