//! API Handlers
//!
//! HTTP request handlers for each scanner endpoint. Every token endpoint
//! validates `chain` and `address` before touching a provider.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::analysis::parse_target;
use crate::cache::{CacheStore, SharedStore};
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    FavoriteEntry, HealthResponse, HolderSummary, MessageResponse, RelatedToken, RiskReport,
    StatsResponse, TokenDetails, TokenReport, TransferSummary, TrendingToken,
};
use crate::providers::TokenData;
use crate::scanner::TokenScanner;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub scanner: Arc<TokenScanner>,
}

impl AppState {
    pub fn new(scanner: TokenScanner) -> Self {
        Self {
            scanner: Arc::new(scanner),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the shared store and every provider client from the Config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = CacheStore::shared(config.cache_ttl());
        let data = TokenData::from_config(config, store)?;
        Ok(Self::new(TokenScanner::new(data)))
    }

    /// Handle to the memoization store, for the reaper.
    pub fn store(&self) -> SharedStore {
        self.scanner.store().clone()
    }
}

/// Handler for GET /scan/:chain/:address
pub async fn scan_handler(
    State(state): State<AppState>,
    Path((chain, address)): Path<(String, String)>,
) -> Result<Json<TokenReport>> {
    let (chain, address) = parse_target(&chain, &address)?;
    Ok(Json(state.scanner.scan(chain, &address).await?))
}

/// Handler for GET /details/:chain/:address
pub async fn details_handler(
    State(state): State<AppState>,
    Path((chain, address)): Path<(String, String)>,
) -> Result<Json<TokenDetails>> {
    let (chain, address) = parse_target(&chain, &address)?;
    Ok(Json(state.scanner.details(chain, &address).await?))
}

/// Handler for GET /holders/:chain/:address
pub async fn holders_handler(
    State(state): State<AppState>,
    Path((chain, address)): Path<(String, String)>,
) -> Result<Json<Vec<HolderSummary>>> {
    let (chain, address) = parse_target(&chain, &address)?;
    Ok(Json(state.scanner.holders(chain, &address).await?))
}

/// Handler for GET /transfers/:chain/:address
pub async fn transfers_handler(
    State(state): State<AppState>,
    Path((chain, address)): Path<(String, String)>,
) -> Result<Json<Vec<TransferSummary>>> {
    let (chain, address) = parse_target(&chain, &address)?;
    Ok(Json(state.scanner.transfers(chain, &address).await?))
}

/// Handler for GET /risk/:chain/:address
pub async fn risk_handler(
    State(state): State<AppState>,
    Path((chain, address)): Path<(String, String)>,
) -> Result<Json<RiskReport>> {
    let (chain, address) = parse_target(&chain, &address)?;
    Ok(Json(state.scanner.risk(chain, &address).await?))
}

/// Handler for GET /related/:chain/:address
pub async fn related_handler(
    State(state): State<AppState>,
    Path((chain, address)): Path<(String, String)>,
) -> Result<Json<Vec<RelatedToken>>> {
    let (chain, address) = parse_target(&chain, &address)?;
    Ok(Json(state.scanner.related(chain, &address).await?))
}

/// Handler for GET /map/:chain/:address
///
/// Serves the PNG screenshot of the token's bubble map.
pub async fn map_handler(
    State(state): State<AppState>,
    Path((chain, address)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let (chain, address) = parse_target(&chain, &address)?;
    let png = state.scanner.map(chain, &address).await?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

/// Handler for POST /favorites/:user/:chain/:address
pub async fn add_favorite_handler(
    State(state): State<AppState>,
    Path((user, chain, address)): Path<(String, String, String)>,
) -> Result<Json<MessageResponse>> {
    let (chain, address) = parse_target(&chain, &address)?;
    state.scanner.add_favorite(&user, chain, &address).await?;
    Ok(Json(MessageResponse::new("Token added to favorites!")))
}

/// Handler for DELETE /favorites/:user/:chain/:address
pub async fn remove_favorite_handler(
    State(state): State<AppState>,
    Path((user, chain, address)): Path<(String, String, String)>,
) -> Result<Json<MessageResponse>> {
    let (chain, address) = parse_target(&chain, &address)?;
    state.scanner.remove_favorite(&user, chain, &address).await?;
    Ok(Json(MessageResponse::new("Token removed from your favorites.")))
}

/// Handler for GET /favorites/:user
pub async fn list_favorites_handler(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Json<Vec<FavoriteEntry>> {
    Json(state.scanner.favorites(&user).await)
}

/// Handler for GET /trending
pub async fn trending_handler(State(state): State<AppState>) -> Result<Json<Vec<TrendingToken>>> {
    Ok(Json(state.scanner.trending().await?))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.scanner.store().read().await.stats();
    Json(StatsResponse::new(
        &stats,
        state.scanner.total_scans(),
        state.scanner.unique_favorites().await,
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
