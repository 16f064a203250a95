//! Token Analysis
//!
//! Pure functions turning provider results into report fragments, plus the
//! process-wide scan counter.

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::error::{Result, ScanError};
use crate::models::{
    Chain, HolderNode, HolderSummary, RelatedToken, RiskReport, TokenGraph, TransferSummary,
};
use crate::models::responses::NOT_AVAILABLE;

/// Base URL of the rendered bubble map
pub const MAP_BASE_URL: &str = "https://app.bubblemaps.io";

/// Volume at which the liquidity factor saturates, in USD
const LIQUIDITY_CAP_USD: f64 = 5e6;

// == Risk Level ==
/// Risk tier shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    Elevated,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "🟢 Low",
            RiskLevel::Medium => "🟡 Medium",
            RiskLevel::Elevated => "🟠 Elevated",
            RiskLevel::High => "🔴 High",
        }
    }
}

// == Input Validation ==
/// Checks an address against the chain's format.
///
/// EVM chains need a `0x` prefix and 42 characters; Solana accepts any
/// non-empty address.
pub fn validate_address(chain: Chain, address: &str) -> Result<()> {
    let valid = if chain.is_evm() {
        address.starts_with("0x") && address.len() == 42
    } else {
        !address.is_empty()
    };

    if valid {
        Ok(())
    } else {
        Err(ScanError::InvalidAddress(address.to_string()))
    }
}

/// Parses and validates a `(chain, address)` pair from user input.
pub fn parse_target(chain: &str, address: &str) -> Result<(Chain, String)> {
    let chain: Chain = chain.parse()?;
    let address = address.trim();
    validate_address(chain, address)?;
    Ok((chain, address.to_string()))
}

pub fn map_url(chain: Chain, address: &str) -> String {
    format!("{}/{}/token/{}", MAP_BASE_URL, chain, address)
}

/// `0x1234...abcd` form of an address.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

fn prefix6(address: &str) -> String {
    address.chars().take(6).collect()
}

// == Holders ==
/// The first `n` holders in provider order.
pub fn top_holders(graph: &TokenGraph, n: usize) -> Vec<HolderSummary> {
    graph
        .nodes
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, node)| HolderSummary {
            rank: i + 1,
            address: short_address(&node.address),
            percentage: node.percentage,
            is_contract: node.is_contract,
        })
        .collect()
}

// == Transfers ==
fn link_endpoints<'a>(
    graph: &'a TokenGraph,
    source: Option<usize>,
    target: Option<usize>,
) -> Option<(&'a HolderNode, &'a HolderNode)> {
    let source = graph.nodes.get(source?)?;
    let target = graph.nodes.get(target?)?;
    Some((source, target))
}

fn by_amount_desc(a: f64, b: f64) -> CmpOrdering {
    b.partial_cmp(&a).unwrap_or(CmpOrdering::Equal)
}

/// The `n` largest transfers by amount.
///
/// A link whose endpoints are not in `nodes` keeps its rank and is reported
/// with no `from`/`to`.
pub fn top_transfers(graph: &TokenGraph, n: usize) -> Vec<TransferSummary> {
    let mut links: Vec<_> = graph.links.iter().collect();
    links.sort_by(|a, b| by_amount_desc(a.amount(), b.amount()));

    links
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, link)| {
            let endpoints = link_endpoints(graph, link.source, link.target);
            TransferSummary {
                rank: i + 1,
                from: endpoints.map(|(from, _)| prefix6(&from.address)),
                to: endpoints.map(|(_, to)| prefix6(&to.address)),
                amount: link.amount(),
            }
        })
        .collect()
}

/// The largest transfer, or `None` when there are no links or the largest
/// one has invalid endpoints.
pub fn largest_transfer(graph: &TokenGraph) -> Option<TransferSummary> {
    top_transfers(graph, 1)
        .into_iter()
        .next()
        .filter(TransferSummary::is_valid)
}

// == Risk ==
/// Holder concentration: the ten largest holders and all contracts.
///
/// Tiers: High above 40%, Medium above 35%, Elevated above 20%, else Low.
pub fn concentration_risk(graph: &TokenGraph) -> RiskReport {
    let top10_pct: f64 = graph.nodes.iter().take(10).map(|n| n.percentage).sum();
    let contract_pct: f64 = graph
        .nodes
        .iter()
        .filter(|n| n.is_contract)
        .map(|n| n.percentage)
        .sum();

    let level = if top10_pct > 40.0 {
        RiskLevel::High
    } else if top10_pct > 35.0 {
        RiskLevel::Medium
    } else if top10_pct > 20.0 {
        RiskLevel::Elevated
    } else {
        RiskLevel::Low
    };

    RiskReport {
        top10_pct,
        contract_pct,
        level,
    }
}

/// Weighted composite of decentralisation, exchange and contract exposure,
/// and liquidity.
///
/// Weights are 0.5 / 0.2 / 0.2 / 0.1. Volume saturates at 5M USD. Tiers: Low
/// at 0.75 and above, Medium at 0.55, Elevated at 0.35, High below.
pub fn compute_risk(score: f64, volume: f64, cex_pct: f64, contract_pct: f64) -> RiskLevel {
    let composite = 0.5 * (score / 100.0)
        + 0.2 * (1.0 - cex_pct / 100.0)
        + 0.2 * (1.0 - contract_pct / 100.0)
        + 0.1 * (volume / LIQUIDITY_CAP_USD).min(1.0);

    if composite >= 0.75 {
        RiskLevel::Low
    } else if composite >= 0.55 {
        RiskLevel::Medium
    } else if composite >= 0.35 {
        RiskLevel::Elevated
    } else {
        RiskLevel::High
    }
}

// == Related Tokens ==
pub fn related_tokens(graph: &TokenGraph, chain: Chain, n: usize) -> Vec<RelatedToken> {
    graph
        .token_links
        .iter()
        .take(n)
        .map(|link| RelatedToken {
            symbol: link
                .symbol
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            address: link.address.clone(),
            url: map_url(chain, &link.address),
        })
        .collect()
}

// == Scan Counter ==
/// Count of completed scans since startup.
#[derive(Debug, Default)]
pub struct ScanCounter {
    total: AtomicU64,
}

impl ScanCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed scan and returns the new total.
    pub fn increment(&self) -> u64 {
        self.total.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}
