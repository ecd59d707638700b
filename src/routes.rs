//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: database, cache, AI (public)
//! - `/api/*`            - REST API (Bearer token required)
//! - `/api/admin/*`      - Admin panel (Bearer token, `admin` role)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, one profile per route group
//! - **Authentication** - Bearer token
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::{self, RateLimit};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let admin_router = rate_limit::apply(api::routes::admin_routes(), RateLimit::Admin, behind_proxy);

    let user_router = rate_limit::apply(
        api::routes::protected_routes(),
        RateLimit::Api,
        behind_proxy,
    );

    let api_router = user_router
        .nest("/admin", admin_router)
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let public_router = rate_limit::apply(
        Router::new().route("/health", get(health_handler)),
        RateLimit::Public,
        behind_proxy,
    );

    let router = Router::new()
        .merge(public_router)
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
