//! Response DTOs for the scanner API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::analysis::RiskLevel;
use crate::cache::CacheStats;
use crate::models::Chain;

/// Placeholder for fields the provider did not return
pub const NOT_AVAILABLE: &str = "N/A";

/// One row of a top-holders listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HolderSummary {
    /// 1-based position in the listing
    pub rank: usize,
    /// Shortened address, `0x1234...abcd`
    pub address: String,
    pub percentage: f64,
    pub is_contract: bool,
}

/// One transfer between two holders.
///
/// `from` and `to` are `None` when the link points outside the holder list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferSummary {
    pub rank: usize,
    /// First six characters of the sender address
    pub from: Option<String>,
    /// First six characters of the receiver address
    pub to: Option<String>,
    pub amount: f64,
}

impl TransferSummary {
    pub fn is_valid(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }
}

/// Holder-concentration risk for a token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    /// Combined percentage held by the ten largest holders
    pub top10_pct: f64,
    /// Combined percentage held by contracts
    pub contract_pct: f64,
    pub level: RiskLevel,
}

/// A token sharing holders with the scanned one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedToken {
    pub symbol: String,
    pub address: String,
    pub url: String,
}

/// Response body for GET /details/:chain/:address
#[derive(Debug, Clone, Serialize)]
pub struct TokenDetails {
    pub name: String,
    pub symbol: String,
    pub chain: Chain,
    pub supply: Option<f64>,
    pub is_nft: bool,
    pub holder_count: usize,
    pub transfer_count: usize,
}

/// Response body for GET /scan/:chain/:address
#[derive(Debug, Clone, Serialize)]
pub struct TokenReport {
    pub name: String,
    pub symbol: String,
    pub chain: Chain,
    pub address: String,
    /// Decentralisation score out of 100
    pub score: Option<f64>,
    pub cex_pct: f64,
    pub contract_pct: f64,
    pub price: f64,
    pub market_cap: f64,
    pub volume: f64,
    /// Composite risk tier
    pub risk: RiskLevel,
    /// Display form of `risk`
    pub risk_label: &'static str,
    pub top_holders: Vec<HolderSummary>,
    pub largest_transfer: Option<TransferSummary>,
    pub map_url: String,
}

/// One saved token in a favorites listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FavoriteEntry {
    pub chain: Chain,
    pub address: String,
    /// Last six characters of the address
    pub label: String,
    pub url: String,
}

/// One row of GET /trending, ranked by 24h volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingToken {
    pub rank: usize,
    pub chain: Chain,
    pub name: String,
    pub address: String,
    pub volume: f64,
    pub price: f64,
    pub url: String,
}

/// Confirmation body for favorites changes
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of results stored after a miss
    pub stores: u64,
    /// Number of entries removed by the reaper
    pub reaped: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Completed token scans since startup
    pub total_scans: u64,
    /// Distinct tokens saved by at least one user
    pub unique_favorites: usize,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics and scanner counters
    pub fn new(stats: &CacheStats, total_scans: u64, unique_favorites: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            stores: stats.stores,
            reaped: stats.reaped,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            total_scans,
            unique_favorites,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
