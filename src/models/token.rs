//! Token data models
//!
//! Results produced by the token-data and market-data providers. These are
//! the values the memoizer stores.

use serde::{Deserialize, Serialize};

// == Token Graph ==
/// Holder/transfer graph for one token.
///
/// Every field is optional in the upstream payload; absent collections
/// decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenGraph {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub supply: Option<f64>,
    /// Whether the token is an NFT collection
    #[serde(default, rename = "is_X721")]
    pub is_nft: bool,
    /// Holders, largest first
    #[serde(default)]
    pub nodes: Vec<HolderNode>,
    /// Transfers between holders, indexing into `nodes`
    #[serde(default)]
    pub links: Vec<TransferLink>,
    /// Other tokens sharing holders with this one
    #[serde(default)]
    pub token_links: Vec<TokenLink>,
}

/// A single holder in the graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HolderNode {
    pub address: String,
    /// Share of total supply, in percent
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub is_contract: bool,
    #[serde(default)]
    pub name: Option<String>,
}

/// Aggregated transfers between two holders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferLink {
    #[serde(default)]
    pub source: Option<usize>,
    #[serde(default)]
    pub target: Option<usize>,
    #[serde(default)]
    pub forward: f64,
    #[serde(default)]
    pub backward: f64,
}

impl TransferLink {
    /// Larger of the two directional amounts.
    pub fn amount(&self) -> f64 {
        self.forward.max(self.backward)
    }
}

/// A related token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenLink {
    pub address: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

// == Supply Metadata ==
/// Decentralisation score and identified supply split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyMeta {
    /// Decentralisation score out of 100
    pub score: Option<f64>,
    /// Percent of supply held on centralised exchanges
    pub cex_pct: f64,
    /// Percent of supply held by contracts
    pub contract_pct: f64,
}

// == Market Data ==
/// USD market figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub price: f64,
    pub volume: f64,
    pub cap: f64,
}
