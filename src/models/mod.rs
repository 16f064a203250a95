//! Data models
//!
//! Chain identifiers, provider results, and HTTP response bodies.

pub mod chain;
pub mod responses;
pub mod token;

// Re-export commonly used types
pub use chain::Chain;
pub use responses::{
    ErrorResponse, FavoriteEntry, HealthResponse, HolderSummary, MessageResponse, RelatedToken,
    RiskReport, StatsResponse, TokenDetails, TokenReport, TransferSummary, TrendingToken,
};
pub use token::{HolderNode, MarketData, SupplyMeta, TokenGraph, TokenLink, TransferLink};
