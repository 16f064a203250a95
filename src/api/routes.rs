//! API Routes
//!
//! Configures the Axum router with all scanner endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_favorite_handler, details_handler, health_handler, holders_handler,
    list_favorites_handler, map_handler, related_handler, remove_favorite_handler, risk_handler,
    scan_handler, stats_handler, transfers_handler, trending_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/scan/:chain/:address", get(scan_handler))
        .route("/details/:chain/:address", get(details_handler))
        .route("/holders/:chain/:address", get(holders_handler))
        .route("/transfers/:chain/:address", get(transfers_handler))
        .route("/risk/:chain/:address", get(risk_handler))
        .route("/related/:chain/:address", get(related_handler))
        .route("/map/:chain/:address", get(map_handler))
        .route("/favorites/:user", get(list_favorites_handler))
        .route(
            "/favorites/:user/:chain/:address",
            post(add_favorite_handler).delete(remove_favorite_handler),
        )
        .route("/trending", get(trending_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
