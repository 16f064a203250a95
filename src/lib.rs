//! Bubble Scanner - token holder analysis over expiring memoized fetches
//!
//! Every provider call goes through a TTL memoizer backed by one shared
//! store, which a background reaper sweeps on a fixed interval.

pub mod analysis;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod favorites;
pub mod models;
pub mod providers;
pub mod scanner;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheStore, Memoized, SharedStore};
pub use config::Config;
pub use error::{Result, ScanError};
pub use scanner::TokenScanner;
pub use tasks::spawn_reaper_task;
