//! Integration Tests for API Endpoints
//!
//! Drives the full router against token and market providers served by a
//! local stub, checking report contents and that repeated requests inside
//! the TTL are answered from the store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    routing::get,
    Json, Router,
};
use bubble_scanner::{
    api::create_router,
    cache::CacheStore,
    providers::{http_client, BubblemapsClient, CoinGeckoClient, ScreenshotGenerator, TokenData},
    AppState, TokenScanner,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

const ADDR: &str = "0x1111111111111111111111111111111111111111";

// == Helper Functions ==

#[derive(Clone, Default)]
struct Hits {
    map: Arc<AtomicUsize>,
    meta: Arc<AtomicUsize>,
    market: Arc<AtomicUsize>,
}

fn map_data() -> Value {
    json!({
        "full_name": "Sample Token",
        "symbol": "SMP",
        "supply": 1000000.0,
        "nodes": [
            {"address": "0xaaaaaa0000000000000000000000000000001111", "percentage": 12.0, "is_contract": false},
            {"address": "0xbbbbbb0000000000000000000000000000002222", "percentage": 6.0, "is_contract": true},
            {"address": "0xcccccc0000000000000000000000000000003333", "percentage": 4.0, "is_contract": false}
        ],
        "links": [
            {"source": 0, "target": 1, "forward": 7.0, "backward": 1.0},
            {"source": 1, "target": 2, "forward": 2.0, "backward": 3.0}
        ],
        "token_links": [
            {"address": "0x2222222222222222222222222222222222222222", "symbol": "REL"}
        ]
    })
}

/// Serves stub providers on an ephemeral port; `known` is the only address
/// the market provider recognises.
async fn spawn_providers(hits: Hits, known: &'static str) -> String {
    let Hits { map, meta, market } = hits;
    let router = Router::new()
        .route(
            "/map-data",
            get(move || {
                map.fetch_add(1, Ordering::SeqCst);
                async { Json(map_data()) }
            }),
        )
        .route(
            "/map-metadata",
            get(move || {
                meta.fetch_add(1, Ordering::SeqCst);
                async {
                    Json(json!({
                        "decentralisation_score": 70.0,
                        "identified_supply": {"percent_in_cexs": 10.0, "percent_in_contracts": 6.0}
                    }))
                }
            }),
        )
        .route(
            "/coins/:platform/contract/:address",
            get(
                move |axum::extract::Path((_, address)): axum::extract::Path<(String, String)>| {
                    market.fetch_add(1, Ordering::SeqCst);
                    async move {
                        if address != known {
                            return (StatusCode::NOT_FOUND, Json(json!({"error": "coin not found"})));
                        }
                        (
                            StatusCode::OK,
                            Json(json!({
                                "market_data": {
                                    "current_price": {"usd": 0.5},
                                    "total_volume": {"usd": 250000.0},
                                    "market_cap": {"usd": 500000.0}
                                }
                            })),
                        )
                    }
                },
            ),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn create_test_app(base: &str, screenshots: ScreenshotGenerator) -> Router {
    let http = http_client(Duration::from_secs(5)).unwrap();
    let data = TokenData::new(
        CacheStore::shared(Duration::from_secs(300)),
        BubblemapsClient::new(http.clone(), base),
        CoinGeckoClient::new(http, base),
        screenshots,
    );
    create_router(AppState::new(TokenScanner::new(data)))
}

fn no_browser() -> ScreenshotGenerator {
    ScreenshotGenerator::new("definitely-not-a-browser-binary", Duration::from_secs(1))
}

async fn get_request(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// == Scan Endpoint Tests ==

#[tokio::test]
async fn test_scan_endpoint_success() {
    let base = spawn_providers(Hits::default(), ADDR).await;
    let app = create_test_app(&base, no_browser());

    let response = get_request(&app, &format!("/scan/eth/{}", ADDR)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["name"], "Sample Token");
    assert_eq!(json["symbol"], "SMP");
    assert_eq!(json["chain"], "eth");
    assert_eq!(json["score"], 70.0);
    assert_eq!(json["price"], 0.5);
    // 0.35 + 0.18 + 0.188 + 0.005 = 0.723
    assert_eq!(json["risk"], "medium");
    assert_eq!(json["top_holders"].as_array().unwrap().len(), 3);
    assert_eq!(json["top_holders"][0]["address"], "0xaaaa...1111");
    assert_eq!(json["largest_transfer"]["amount"], 7.0);
    assert_eq!(
        json["map_url"],
        format!("https://app.bubblemaps.io/eth/token/{}", ADDR)
    );
}

#[tokio::test]
async fn test_repeated_scan_is_served_from_store() {
    let hits = Hits::default();
    let base = spawn_providers(hits.clone(), ADDR).await;
    let app = create_test_app(&base, no_browser());
    let uri = format!("/scan/eth/{}", ADDR);

    assert_eq!(get_request(&app, &uri).await.status(), StatusCode::OK);
    assert_eq!(get_request(&app, &uri).await.status(), StatusCode::OK);

    assert_eq!(hits.map.load(Ordering::SeqCst), 1);
    assert_eq!(hits.meta.load(Ordering::SeqCst), 1);
    assert_eq!(hits.market.load(Ordering::SeqCst), 1);

    let stats = body_to_json(get_request(&app, "/stats").await.into_body()).await;
    assert_eq!(stats["hits"], 3);
    assert_eq!(stats["misses"], 3);
    assert_eq!(stats["stores"], 3);
    assert_eq!(stats["total_entries"], 3);
    assert_eq!(stats["total_scans"], 2);
}

#[tokio::test]
async fn test_scan_missing_market_data_is_not_found() {
    let hits = Hits::default();
    let base = spawn_providers(hits.clone(), ADDR).await;
    let app = create_test_app(&base, no_browser());
    let other = "0x9999999999999999999999999999999999999999";
    let uri = format!("/scan/eth/{}", other);

    let response = get_request(&app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Failed to fetch token data.");

    // Absence is cached like any other result.
    assert_eq!(get_request(&app, &uri).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(hits.market.load(Ordering::SeqCst), 1);

    let stats = body_to_json(get_request(&app, "/stats").await.into_body()).await;
    assert_eq!(stats["total_scans"], 0);
}

#[tokio::test]
async fn test_scan_invalid_input() {
    let base = spawn_providers(Hits::default(), ADDR).await;
    let app = create_test_app(&base, no_browser());

    let response = get_request(&app, &format!("/scan/doge/{}", ADDR)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().starts_with("Unsupported chain"));

    let response = get_request(&app, "/scan/eth/1111").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == Graph View Tests ==

#[tokio::test]
async fn test_graph_views_share_one_fetch() {
    let hits = Hits::default();
    let base = spawn_providers(hits.clone(), ADDR).await;
    let app = create_test_app(&base, no_browser());

    let details = body_to_json(
        get_request(&app, &format!("/details/eth/{}", ADDR)).await.into_body(),
    )
    .await;
    assert_eq!(details["holder_count"], 3);
    assert_eq!(details["transfer_count"], 2);
    assert_eq!(details["is_nft"], false);

    let holders = body_to_json(
        get_request(&app, &format!("/holders/eth/{}", ADDR)).await.into_body(),
    )
    .await;
    assert_eq!(holders.as_array().unwrap().len(), 3);
    assert_eq!(holders[1]["is_contract"], true);

    let transfers = body_to_json(
        get_request(&app, &format!("/transfers/eth/{}", ADDR)).await.into_body(),
    )
    .await;
    assert_eq!(transfers[0]["from"], "0xaaaa");
    assert_eq!(transfers[1]["amount"], 3.0);

    let risk = body_to_json(
        get_request(&app, &format!("/risk/eth/{}", ADDR)).await.into_body(),
    )
    .await;
    assert_eq!(risk["top10_pct"], 22.0);
    assert_eq!(risk["level"], "elevated");

    let related = body_to_json(
        get_request(&app, &format!("/related/eth/{}", ADDR)).await.into_body(),
    )
    .await;
    assert_eq!(related[0]["symbol"], "REL");

    assert_eq!(hits.map.load(Ordering::SeqCst), 1);
}

// == Map Endpoint Tests ==

#[tokio::test]
async fn test_map_without_browser_is_not_found() {
    let base = spawn_providers(Hits::default(), ADDR).await;
    let app = create_test_app(&base, no_browser());

    let response = get_request(&app, &format!("/map/eth/{}", ADDR)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Failed to generate map.");
}

#[cfg(unix)]
#[tokio::test]
async fn test_map_serves_png() {
    const FAKE_BROWSER: &str = r#"
for arg in "$@"; do
  case "$arg" in
    --screenshot=*) printf 'PNG' > "${arg#--screenshot=}" ;;
  esac
done
"#;
    let dir = std::env::temp_dir().join(format!("bubble_scanner_it_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let script = dir.join("fake_browser.sh");
    std::fs::write(&script, FAKE_BROWSER).unwrap();

    let screenshots = ScreenshotGenerator::new("sh", Duration::from_secs(10))
        .with_launcher_args([script.display().to_string()])
        .with_output_dir(&dir);
    let base = spawn_providers(Hits::default(), ADDR).await;
    let app = create_test_app(&base, screenshots);

    let response = get_request(&app, &format!("/map/eth/{}", ADDR)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"PNG");

    std::fs::remove_dir_all(&dir).unwrap();
}

// == Favorites & Trending Tests ==

async fn send(app: &Router, method: &str, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_favorites_feed_trending_from_cache() {
    let hits = Hits::default();
    let base = spawn_providers(hits.clone(), ADDR).await;
    let app = create_test_app(&base, no_browser());
    let unlisted = "0x9999999999999999999999999999999999999999";

    assert_eq!(
        get_request(&app, &format!("/scan/eth/{}", ADDR)).await.status(),
        StatusCode::OK
    );

    let response = send(&app, "POST", &format!("/favorites/alice/eth/{}", ADDR)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["message"], "Token added to favorites!");

    let response = send(&app, "POST", &format!("/favorites/alice/eth/{}", ADDR)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Token is already in your favorites.");

    let response = send(&app, "POST", &format!("/favorites/bob/eth/{}", unlisted)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let favorites = body_to_json(get_request(&app, "/favorites/alice").await.into_body()).await;
    assert_eq!(favorites.as_array().unwrap().len(), 1);
    assert_eq!(favorites[0]["label"], "111111");

    let response = get_request(&app, "/trending").await;
    assert_eq!(response.status(), StatusCode::OK);
    let trending = body_to_json(response.into_body()).await;
    assert_eq!(trending.as_array().unwrap().len(), 1);
    assert_eq!(trending[0]["rank"], 1);
    assert_eq!(trending[0]["name"], "Sample Token");
    assert_eq!(trending[0]["volume"], 250000.0);

    // The scanned token came from the store; only the unlisted one was requested.
    assert_eq!(hits.market.load(Ordering::SeqCst), 2);
    assert_eq!(hits.map.load(Ordering::SeqCst), 1);

    let stats = body_to_json(get_request(&app, "/stats").await.into_body()).await;
    assert_eq!(stats["unique_favorites"], 2);

    let response = send(&app, "DELETE", &format!("/favorites/bob/eth/{}", unlisted)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = send(&app, "DELETE", &format!("/favorites/bob/eth/{}", unlisted)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let stats = body_to_json(get_request(&app, "/stats").await.into_body()).await;
    assert_eq!(stats["unique_favorites"], 1);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app("http://127.0.0.1:1", no_browser());

    let response = get_request(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
