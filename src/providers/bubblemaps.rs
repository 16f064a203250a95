//! Token-data provider client
//!
//! Fetches holder graphs and supply metadata from the Bubblemaps API.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{extract, read_json};
use crate::error::Result;
use crate::models::{Chain, SupplyMeta, TokenGraph};

const PROVIDER: &str = "bubblemaps";

#[derive(Debug, Deserialize)]
struct MetadataPayload {
    #[serde(default)]
    decentralisation_score: Option<f64>,
    identified_supply: IdentifiedSupply,
}

#[derive(Debug, Deserialize)]
struct IdentifiedSupply {
    percent_in_cexs: f64,
    percent_in_contracts: f64,
}

impl From<MetadataPayload> for SupplyMeta {
    fn from(payload: MetadataPayload) -> Self {
        Self {
            score: payload.decentralisation_score,
            cex_pct: payload.identified_supply.percent_in_cexs,
            contract_pct: payload.identified_supply.percent_in_contracts,
        }
    }
}

/// Client for the Bubblemaps legacy API.
#[derive(Debug, Clone)]
pub struct BubblemapsClient {
    http: Client,
    base_url: String,
}

impl BubblemapsClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetches the holder/transfer graph for a token.
    ///
    /// Returns `Ok(None)` when the provider has no map for the token.
    pub async fn fetch_map_data(&self, chain: Chain, address: &str) -> Result<Option<TokenGraph>> {
        debug!(%chain, address, "Fetching token graph");
        let response = self
            .http
            .get(format!("{}/map-data", self.base_url))
            .query(&[("token", address), ("chain", chain.as_str())])
            .send()
            .await?;

        Ok(read_json(response, PROVIDER)
            .await?
            .and_then(|value| extract(value, PROVIDER)))
    }

    /// Fetches decentralisation score and identified supply split.
    ///
    /// Returns `Ok(None)` on a non-200 status or when `identified_supply` is
    /// missing from the payload.
    pub async fn fetch_metadata(&self, chain: Chain, address: &str) -> Result<Option<SupplyMeta>> {
        debug!(%chain, address, "Fetching supply metadata");
        let response = self
            .http
            .get(format!("{}/map-metadata", self.base_url))
            .query(&[("chain", chain.as_str()), ("token", address)])
            .send()
            .await?;

        Ok(read_json(response, PROVIDER)
            .await?
            .and_then(|value| extract::<MetadataPayload>(value, PROVIDER))
            .map(SupplyMeta::from))
    }
}
