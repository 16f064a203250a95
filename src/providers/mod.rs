//! Providers Module
//!
//! Clients for the external services the scanner depends on, and the
//! memoized fetchers built on top of them.
//!
//! # Providers
//! - Token graph and supply metadata (Bubblemaps API)
//! - Market data (CoinGecko API)
//! - Rendered map screenshots (headless Chromium)

mod bubblemaps;
mod coingecko;
mod fetchers;
mod screenshot;

pub use bubblemaps::BubblemapsClient;
pub use coingecko::CoinGeckoClient;
pub use fetchers::TokenData;
pub use screenshot::ScreenshotGenerator;

use std::time::Duration;

use reqwest::Client;

use crate::error::Result;

/// Builds the shared outbound HTTP client with a per-request timeout.
pub fn http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(concat!("bubble_scanner/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Reads a JSON body, treating anything but 200 as absence.
///
/// Transport failures and malformed JSON are errors; a non-200 status is
/// logged and returned as `Ok(None)`.
async fn read_json(
    response: reqwest::Response,
    provider: &'static str,
) -> Result<Option<serde_json::Value>> {
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        tracing::warn!(provider, %status, "Provider returned non-200 status");
        return Ok(None);
    }

    let bytes = response.bytes().await?;
    Ok(Some(serde_json::from_slice(&bytes)?))
}

/// Converts a decoded JSON value into `T`, treating missing fields as absence.
fn extract<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
    provider: &'static str,
) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::warn!(provider, error = %err, "Provider payload missing expected fields");
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;
    use tokio::net::TcpListener;

    /// Serves `router` on an ephemeral local port and returns its base URL.
    pub async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }
}
