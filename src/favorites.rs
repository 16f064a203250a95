//! Favorites Registry
//!
//! Per-user watchlists plus a process-wide count of how many users saved
//! each token. The global set feeds the trending listing.

use std::collections::{BTreeMap, HashMap};

use tokio::sync::RwLock;
use tracing::debug;

use crate::analysis::map_url;
use crate::error::{Result, ScanError};
use crate::models::{Chain, FavoriteEntry};

pub const ALREADY_FAVORITE: &str = "Token is already in your favorites.";
pub const NOT_A_FAVORITE: &str = "Token not found in your favorites.";

/// A saved `(chain, address)` pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FavoriteToken {
    pub chain: Chain,
    pub address: String,
}

impl FavoriteToken {
    pub fn new(chain: Chain, address: impl Into<String>) -> Self {
        Self {
            chain,
            address: address.into(),
        }
    }

    pub fn to_entry(&self) -> FavoriteEntry {
        let chars: Vec<char> = self.address.chars().collect();
        let label: String = chars[chars.len().saturating_sub(6)..].iter().collect();

        FavoriteEntry {
            chain: self.chain,
            address: self.address.clone(),
            label,
            url: map_url(self.chain, &self.address),
        }
    }
}

#[derive(Debug, Default)]
struct Registry {
    /// Each user's list, in the order tokens were added
    users: HashMap<String, Vec<FavoriteToken>>,
    /// Number of users holding each token; entries at zero are removed
    global: BTreeMap<FavoriteToken, usize>,
}

/// Shared favorites state.
#[derive(Debug, Default)]
pub struct FavoritesRegistry {
    inner: RwLock<Registry>,
}

impl FavoritesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves `token` for `user`; a duplicate is a `Conflict`.
    pub async fn add(&self, user: &str, token: FavoriteToken) -> Result<()> {
        let mut registry = self.inner.write().await;
        let list = registry.users.entry(user.to_string()).or_default();

        if list.contains(&token) {
            return Err(ScanError::Conflict(ALREADY_FAVORITE.to_string()));
        }

        list.push(token.clone());
        *registry.global.entry(token.clone()).or_insert(0) += 1;
        debug!(user, chain = %token.chain, address = %token.address, "Favorite added");
        Ok(())
    }

    /// Drops `token` from `user`'s list; an unknown token is `NotFound`.
    pub async fn remove(&self, user: &str, token: &FavoriteToken) -> Result<()> {
        let mut registry = self.inner.write().await;

        let Some(list) = registry.users.get_mut(user) else {
            return Err(ScanError::NotFound(NOT_A_FAVORITE.to_string()));
        };
        let Some(pos) = list.iter().position(|t| t == token) else {
            return Err(ScanError::NotFound(NOT_A_FAVORITE.to_string()));
        };

        list.remove(pos);
        if list.is_empty() {
            registry.users.remove(user);
        }

        if let Some(count) = registry.global.get_mut(token) {
            *count -= 1;
            if *count == 0 {
                registry.global.remove(token);
            }
        }

        debug!(user, chain = %token.chain, address = %token.address, "Favorite removed");
        Ok(())
    }

    pub async fn list(&self, user: &str) -> Vec<FavoriteToken> {
        self.inner
            .read()
            .await
            .users
            .get(user)
            .cloned()
            .unwrap_or_default()
    }

    /// Every token saved by at least one user.
    pub async fn global_tokens(&self) -> Vec<FavoriteToken> {
        self.inner.read().await.global.keys().cloned().collect()
    }

    pub async fn unique_count(&self) -> usize {
        self.inner.read().await.global.len()
    }
}
