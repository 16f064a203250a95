//! Memoized fetchers
//!
//! Each provider call is wrapped in its own `Memoized` so repeated scans of
//! the same token inside the TTL reuse earlier results. All wrappers share one
//! store; the operation name keeps their keys apart.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::cache::{Memoized, SharedStore};
use crate::config::Config;
use crate::error::Result;
use crate::models::{Chain, MarketData, SupplyMeta, TokenGraph};
use crate::providers::{http_client, BubblemapsClient, CoinGeckoClient, ScreenshotGenerator};

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Type-erased `(chain, address)` operation.
type FetchOp<T> = Box<dyn Fn((Chain, String)) -> BoxFuture<Result<T>> + Send + Sync>;

fn memoize<T, F, Fut>(name: &'static str, store: &SharedStore, op: F) -> Memoized<FetchOp<T>>
where
    T: Send + 'static,
    F: Fn(Chain, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    let op: FetchOp<T> = Box::new(
        move |(chain, address): (Chain, String)| -> BoxFuture<Result<T>> {
            Box::pin(op(chain, address))
        },
    );
    Memoized::new(name, store.clone(), op)
}

/// Memoized access to every external data source.
pub struct TokenData {
    bubble: Memoized<FetchOp<Option<TokenGraph>>>,
    meta: Memoized<FetchOp<Option<SupplyMeta>>>,
    market: Memoized<FetchOp<Option<MarketData>>>,
    screenshot: Memoized<FetchOp<Option<PathBuf>>>,
    store: SharedStore,
}

impl TokenData {
    pub fn new(
        store: SharedStore,
        bubblemaps: BubblemapsClient,
        coingecko: CoinGeckoClient,
        screenshots: ScreenshotGenerator,
    ) -> Self {
        let bubble = {
            let client = bubblemaps.clone();
            memoize("fetch_bubble", &store, move |chain, address| {
                let client = client.clone();
                async move { client.fetch_map_data(chain, &address).await }
            })
        };
        let meta = memoize("fetch_meta", &store, move |chain, address| {
            let client = bubblemaps.clone();
            async move { client.fetch_metadata(chain, &address).await }
        });
        let market = memoize("fetch_market", &store, move |chain, address| {
            let client = coingecko.clone();
            async move { client.fetch_market(chain, &address).await }
        });
        let screenshot = memoize("generate_screenshot", &store, move |chain, address| {
            let generator = screenshots.clone();
            async move { generator.generate(chain, &address).await }
        });

        Self {
            bubble,
            meta,
            market,
            screenshot,
            store,
        }
    }

    /// Builds every client from configuration around `store`.
    pub fn from_config(config: &Config, store: SharedStore) -> Result<Self> {
        let http = http_client(config.request_timeout())?;
        let screenshots = ScreenshotGenerator::new(&config.chrome_bin, config.render_timeout())
            .with_launcher_args(config.chrome_args.iter().cloned());

        Ok(Self::new(
            store,
            BubblemapsClient::new(http.clone(), &config.bubblemaps_api_url),
            CoinGeckoClient::new(http, &config.coingecko_api_url),
            screenshots,
        ))
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub async fn fetch_bubble(&self, chain: Chain, address: &str) -> Result<Option<TokenGraph>> {
        self.bubble.call((chain, address.to_string())).await
    }

    pub async fn fetch_meta(&self, chain: Chain, address: &str) -> Result<Option<SupplyMeta>> {
        self.meta.call((chain, address.to_string())).await
    }

    pub async fn fetch_market(&self, chain: Chain, address: &str) -> Result<Option<MarketData>> {
        self.market.call((chain, address.to_string())).await
    }

    pub async fn generate_screenshot(&self, chain: Chain, address: &str) -> Result<Option<PathBuf>> {
        self.screenshot.call((chain, address.to_string())).await
    }

    /// Renders again and replaces the cached screenshot path.
    pub async fn regenerate_screenshot(
        &self,
        chain: Chain,
        address: &str,
    ) -> Result<Option<PathBuf>> {
        self.screenshot.refresh((chain, address.to_string())).await
    }
}

impl std::fmt::Debug for TokenData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenData")
            .field("bubble", &self.bubble)
            .field("meta", &self.meta)
            .field("market", &self.market)
            .field("screenshot", &self.screenshot)
            .finish()
    }
}
