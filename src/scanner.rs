//! Token Scanner
//!
//! Combines the memoized fetchers with the analysis functions into the
//! report-level operations served over HTTP.

use std::io;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::analysis::{
    compute_risk, concentration_risk, largest_transfer, map_url, related_tokens,
    top_holders, top_transfers, ScanCounter,
};
use crate::cache::SharedStore;
use crate::error::{Result, ScanError};
use crate::favorites::{FavoriteToken, FavoritesRegistry};
use crate::models::responses::NOT_AVAILABLE;
use crate::models::{
    Chain, FavoriteEntry, HolderSummary, RelatedToken, RiskReport, TokenDetails, TokenGraph,
    TokenReport, TransferSummary, TrendingToken,
};
use crate::providers::TokenData;

pub const FETCH_FAILED: &str = "Failed to fetch token data.";
pub const MAP_FAILED: &str = "Failed to generate map.";
pub const NO_FAVORITES: &str = "No tokens in global favorites yet.";
pub const NO_TRENDING_DATA: &str = "No valid market data available for trending tokens.";

/// Holders listed in a full scan report
const REPORT_HOLDERS: usize = 3;
const HOLDERS_LIMIT: usize = 5;
const TRANSFERS_LIMIT: usize = 3;
const RELATED_LIMIT: usize = 5;
const TRENDING_LIMIT: usize = 5;

/// Report builder shared by every handler.
#[derive(Debug)]
pub struct TokenScanner {
    data: TokenData,
    scans: ScanCounter,
    favorites: FavoritesRegistry,
}

impl TokenScanner {
    pub fn new(data: TokenData) -> Self {
        Self {
            data,
            scans: ScanCounter::new(),
            favorites: FavoritesRegistry::new(),
        }
    }

    pub fn store(&self) -> &SharedStore {
        self.data.store()
    }

    pub fn total_scans(&self) -> u64 {
        self.scans.total()
    }

    pub async fn unique_favorites(&self) -> usize {
        self.favorites.unique_count().await
    }

    async fn graph(&self, chain: Chain, address: &str) -> Result<TokenGraph> {
        self.data
            .fetch_bubble(chain, address)
            .await?
            .ok_or_else(|| ScanError::NotFound(FETCH_FAILED.to_string()))
    }

    /// Full report: graph, supply metadata and market data must all be present.
    pub async fn scan(&self, chain: Chain, address: &str) -> Result<TokenReport> {
        let graph = self.data.fetch_bubble(chain, address).await?;
        let meta = self.data.fetch_meta(chain, address).await?;
        let market = self.data.fetch_market(chain, address).await?;

        let (Some(graph), Some(meta), Some(market)) = (graph, meta, market) else {
            debug!(%chain, address, "Scan missing provider data");
            return Err(ScanError::NotFound(FETCH_FAILED.to_string()));
        };

        let risk = compute_risk(
            meta.score.unwrap_or(0.0),
            market.volume,
            meta.cex_pct,
            meta.contract_pct,
        );

        let report = TokenReport {
            name: graph.full_name.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            symbol: graph.symbol.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            chain,
            address: address.to_string(),
            score: meta.score,
            cex_pct: meta.cex_pct,
            contract_pct: meta.contract_pct,
            price: market.price,
            market_cap: market.cap,
            volume: market.volume,
            risk,
            risk_label: risk.label(),
            top_holders: top_holders(&graph, REPORT_HOLDERS),
            largest_transfer: largest_transfer(&graph),
            map_url: map_url(chain, address),
        };

        let total = self.scans.increment();
        info!(%chain, address, total_scans = total, "Scan completed");

        Ok(report)
    }

    pub async fn details(&self, chain: Chain, address: &str) -> Result<TokenDetails> {
        let graph = self.graph(chain, address).await?;

        Ok(TokenDetails {
            name: graph.full_name.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            symbol: graph.symbol.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            chain,
            supply: graph.supply,
            is_nft: graph.is_nft,
            holder_count: graph.nodes.len(),
            transfer_count: graph.links.len(),
        })
    }

    pub async fn holders(&self, chain: Chain, address: &str) -> Result<Vec<HolderSummary>> {
        let graph = self.graph(chain, address).await?;
        Ok(top_holders(&graph, HOLDERS_LIMIT))
    }

    pub async fn transfers(&self, chain: Chain, address: &str) -> Result<Vec<TransferSummary>> {
        let graph = self.graph(chain, address).await?;
        Ok(top_transfers(&graph, TRANSFERS_LIMIT))
    }

    pub async fn risk(&self, chain: Chain, address: &str) -> Result<RiskReport> {
        let graph = self.graph(chain, address).await?;
        Ok(concentration_risk(&graph))
    }

    pub async fn related(&self, chain: Chain, address: &str) -> Result<Vec<RelatedToken>> {
        let graph = self.graph(chain, address).await?;
        Ok(related_tokens(&graph, chain, RELATED_LIMIT))
    }

    // == Favorites ==
    pub async fn add_favorite(&self, user: &str, chain: Chain, address: &str) -> Result<()> {
        self.favorites
            .add(user, FavoriteToken::new(chain, address))
            .await
    }

    pub async fn remove_favorite(&self, user: &str, chain: Chain, address: &str) -> Result<()> {
        self.favorites
            .remove(user, &FavoriteToken::new(chain, address))
            .await
    }

    pub async fn favorites(&self, user: &str) -> Vec<FavoriteEntry> {
        self.favorites
            .list(user)
            .await
            .iter()
            .map(FavoriteToken::to_entry)
            .collect()
    }

    /// Globally favorited tokens ranked by 24h volume, top five.
    ///
    /// Goes through the memoized fetchers, so tokens already scanned inside
    /// the TTL cost no provider requests. Tokens without market data are
    /// skipped.
    pub async fn trending(&self) -> Result<Vec<TrendingToken>> {
        let tokens = self.favorites.global_tokens().await;
        if tokens.is_empty() {
            return Err(ScanError::NotFound(NO_FAVORITES.to_string()));
        }

        let mut rows = Vec::with_capacity(tokens.len());
        for token in tokens {
            let Some(market) = self.data.fetch_market(token.chain, &token.address).await? else {
                debug!(chain = %token.chain, address = %token.address, "No market data, skipping");
                continue;
            };
            let name = self
                .data
                .fetch_bubble(token.chain, &token.address)
                .await?
                .and_then(|graph| graph.full_name)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());

            rows.push(TrendingToken {
                rank: 0,
                chain: token.chain,
                name,
                url: map_url(token.chain, &token.address),
                address: token.address,
                volume: market.volume,
                price: market.price,
            });
        }

        if rows.is_empty() {
            return Err(ScanError::NotFound(NO_TRENDING_DATA.to_string()));
        }

        rows.sort_by(|a, b| b.volume.partial_cmp(&a.volume).unwrap_or(std::cmp::Ordering::Equal));
        rows.truncate(TRENDING_LIMIT);
        for (i, row) in rows.iter_mut().enumerate() {
            row.rank = i + 1;
        }

        Ok(rows)
    }

    /// Path of the rendered map, generated at most once per TTL window.
    pub async fn map_path(&self, chain: Chain, address: &str) -> Result<PathBuf> {
        self.data
            .generate_screenshot(chain, address)
            .await?
            .ok_or_else(|| ScanError::NotFound(MAP_FAILED.to_string()))
    }

    /// PNG bytes of the rendered map.
    ///
    /// A cached path whose file has since disappeared is rendered again and
    /// the cache entry replaced.
    pub async fn map(&self, chain: Chain, address: &str) -> Result<Vec<u8>> {
        let path = self.map_path(chain, address).await?;

        match tokio::fs::read(&path).await {
            Ok(png) => Ok(png),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Cached map file missing, rendering again");
                let path = self
                    .data
                    .regenerate_screenshot(chain, address)
                    .await?
                    .ok_or_else(|| ScanError::NotFound(MAP_FAILED.to_string()))?;
                Ok(tokio::fs::read(&path).await?)
            }
            Err(err) => Err(err.into()),
        }
    }
}
