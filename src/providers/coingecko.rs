//! Market-data provider client
//!
//! Fetches USD price, volume and market cap from CoinGecko by contract address.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{extract, read_json};
use crate::error::Result;
use crate::models::{Chain, MarketData};

const PROVIDER: &str = "coingecko";

#[derive(Debug, Deserialize)]
struct CoinPayload {
    market_data: MarketPayload,
}

#[derive(Debug, Deserialize)]
struct MarketPayload {
    current_price: UsdQuote,
    total_volume: UsdQuote,
    market_cap: UsdQuote,
}

#[derive(Debug, Deserialize)]
struct UsdQuote {
    usd: f64,
}

impl From<CoinPayload> for MarketData {
    fn from(payload: CoinPayload) -> Self {
        let md = payload.market_data;
        Self {
            price: md.current_price.usd,
            volume: md.total_volume.usd,
            cap: md.market_cap.usd,
        }
    }
}

/// Client for the CoinGecko public API.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    http: Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetches market figures for a token contract.
    ///
    /// Chains CoinGecko does not list resolve to `Ok(None)` without a request.
    pub async fn fetch_market(&self, chain: Chain, address: &str) -> Result<Option<MarketData>> {
        let Some(platform) = chain.market_platform() else {
            debug!(%chain, "No market platform for chain");
            return Ok(None);
        };

        debug!(platform, address, "Fetching market data");
        let response = self
            .http
            .get(format!(
                "{}/coins/{}/contract/{}",
                self.base_url, platform, address
            ))
            .send()
            .await?;

        Ok(read_json(response, PROVIDER)
            .await?
            .and_then(|value| extract::<CoinPayload>(value, PROVIDER))
            .map(MarketData::from))
    }
}
