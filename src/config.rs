//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::DEFAULT_TTL_SECS;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// TTL in seconds for memoized provider results
    pub cache_expiry: u64,
    /// Reaper interval in seconds
    pub reaper_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the token-data provider
    pub bubblemaps_api_url: String,
    /// Base URL of the market-data provider
    pub coingecko_api_url: String,
    /// Per-request timeout for outbound HTTP calls, in seconds
    pub http_timeout: u64,
    /// Headless browser executable used for map screenshots
    pub chrome_bin: String,
    /// Extra arguments placed before the browser flags
    pub chrome_args: Vec<String>,
    /// Upper bound on a single screenshot run, in seconds
    pub screenshot_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_EXPIRY` - Memoization TTL in seconds (default: 300)
    /// - `REAPER_INTERVAL` - Reaper frequency in seconds (default: `CACHE_EXPIRY`)
    /// - `PORT` - HTTP server port (default: 10000)
    /// - `BUBBLEMAPS_API_URL` - Token-data provider base URL
    /// - `COINGECKO_API_URL` - Market-data provider base URL
    /// - `HTTP_TIMEOUT` - Outbound request timeout in seconds (default: 10)
    /// - `CHROME_BIN` - Headless browser binary (default: chromium)
    /// - `CHROME_ARGS` - Whitespace-separated extra browser arguments
    /// - `SCREENSHOT_TIMEOUT` - Screenshot timeout in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let cache_expiry = parse_var("CACHE_EXPIRY").unwrap_or(defaults.cache_expiry);

        Self {
            cache_expiry,
            reaper_interval: parse_var("REAPER_INTERVAL").unwrap_or(cache_expiry),
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            bubblemaps_api_url: env::var("BUBBLEMAPS_API_URL")
                .unwrap_or(defaults.bubblemaps_api_url),
            coingecko_api_url: env::var("COINGECKO_API_URL").unwrap_or(defaults.coingecko_api_url),
            http_timeout: parse_var("HTTP_TIMEOUT").unwrap_or(defaults.http_timeout),
            chrome_bin: env::var("CHROME_BIN").unwrap_or(defaults.chrome_bin),
            chrome_args: env::var("CHROME_ARGS")
                .map(|v| v.split_whitespace().map(str::to_string).collect())
                .unwrap_or(defaults.chrome_args),
            screenshot_timeout: parse_var("SCREENSHOT_TIMEOUT")
                .unwrap_or(defaults.screenshot_timeout),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_expiry)
    }

    pub fn reaper_period(&self) -> Duration {
        Duration::from_secs(self.reaper_interval.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.screenshot_timeout)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_expiry: DEFAULT_TTL_SECS,
            reaper_interval: DEFAULT_TTL_SECS,
            server_port: 10000,
            bubblemaps_api_url: "https://api-legacy.bubblemaps.io".to_string(),
            coingecko_api_url: "https://api.coingecko.com/api/v3".to_string(),
            http_timeout: 10,
            chrome_bin: "chromium".to_string(),
            chrome_args: Vec::new(),
            screenshot_timeout: 60,
        }
    }
}
