//! Supported chains
//!
//! Chain identifiers accepted by the scanner and their per-provider names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::ArgValue;
use crate::error::ScanError;

// == Chain ==
/// A blockchain the token-data provider can map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Eth,
    Bsc,
    Ftm,
    Avax,
    Cro,
    Arbi,
    Poly,
    Base,
    Sol,
}

impl Chain {
    /// Every supported chain, in display order.
    pub const ALL: [Chain; 9] = [
        Chain::Eth,
        Chain::Bsc,
        Chain::Ftm,
        Chain::Avax,
        Chain::Cro,
        Chain::Arbi,
        Chain::Poly,
        Chain::Base,
        Chain::Sol,
    ];

    /// Short identifier used in provider URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Eth => "eth",
            Chain::Bsc => "bsc",
            Chain::Ftm => "ftm",
            Chain::Avax => "avax",
            Chain::Cro => "cro",
            Chain::Arbi => "arbi",
            Chain::Poly => "poly",
            Chain::Base => "base",
            Chain::Sol => "sol",
        }
    }

    /// Whether addresses on this chain are 20-byte hex with a `0x` prefix.
    pub fn is_evm(&self) -> bool {
        !matches!(self, Chain::Sol)
    }

    /// Platform id on the market-data provider, if it lists this chain.
    pub fn market_platform(&self) -> Option<&'static str> {
        match self {
            Chain::Eth => Some("ethereum"),
            Chain::Bsc => Some("binance-smart-chain"),
            Chain::Sol => Some("solana"),
            _ => None,
        }
    }

    /// Comma-separated list of supported identifiers for error messages.
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(Chain::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Chain> for ArgValue {
    fn from(chain: Chain) -> Self {
        ArgValue::Str(chain.as_str().to_string())
    }
}

impl FromStr for Chain {
    type Err = ScanError;

    /// Parses a chain identifier case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|chain| chain.as_str() == lowered)
            .ok_or_else(|| ScanError::UnsupportedChain(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("ETH".parse::<Chain>().unwrap(), Chain::Eth);
        assert_eq!(" sol ".parse::<Chain>().unwrap(), Chain::Sol);
    }

    #[test]
    fn test_parse_unsupported() {
        let err = "doge".parse::<Chain>().unwrap_err();
        assert!(matches!(err, ScanError::UnsupportedChain(_)));
    }

    #[test]
    fn test_market_platforms() {
        assert_eq!(Chain::Eth.market_platform(), Some("ethereum"));
        assert_eq!(Chain::Bsc.market_platform(), Some("binance-smart-chain"));
        assert_eq!(Chain::Sol.market_platform(), Some("solana"));
        assert_eq!(Chain::Avax.market_platform(), None);
    }

    #[test]
    fn test_supported_list() {
        assert_eq!(
            Chain::supported_list(),
            "eth, bsc, ftm, avax, cro, arbi, poly, base, sol"
        );
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for chain in Chain::ALL {
            assert_eq!(chain.to_string().parse::<Chain>().unwrap(), chain);
        }
    }
}
