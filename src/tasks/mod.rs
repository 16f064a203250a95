//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the service is up.
//!
//! # Tasks
//! - Reaper: removes stale memoized results at a fixed interval

mod reaper;

pub use reaper::spawn_reaper_task;
