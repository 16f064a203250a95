//! API Module
//!
//! HTTP handlers and routing for the scanner REST API.
//!
//! # Endpoints
//! - `GET /scan/:chain/:address` - Full token report
//! - `GET /details/:chain/:address` - Token details
//! - `GET /holders/:chain/:address` - Top holders
//! - `GET /transfers/:chain/:address` - Largest transfers
//! - `GET /risk/:chain/:address` - Holder concentration risk
//! - `GET /related/:chain/:address` - Tokens sharing holders
//! - `GET /map/:chain/:address` - Rendered bubble map (PNG)
//! - `GET /favorites/:user` - A user's saved tokens
//! - `POST /favorites/:user/:chain/:address` - Save a token
//! - `DELETE /favorites/:user/:chain/:address` - Remove a saved token
//! - `GET /trending` - Favorited tokens ranked by volume
//! - `GET /stats` - Cache and scan statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
