//! Per-client rate limiting using a token bucket.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Rate limit profiles.
///
/// | Profile  | Rate     | Burst |
/// |----------|----------|-------|
/// | `Public` | 2 req/s  | 100   |
/// | `Api`    | 10 req/s | 50    |
/// | `Admin`  | 1 req/s  | 10    |
///
/// `Api` is the most generous per second because a single dashboard screen
/// issues several reads at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimit {
    Public,
    Api,
    Admin,
}

impl RateLimit {
    /// `(requests per second, burst size)`.
    pub fn quota(self) -> (u64, u32) {
        match self {
            Self::Public => (2, 100),
            Self::Api => (10, 50),
            Self::Admin => (1, 10),
        }
    }
}

/// Applies a rate limit profile to every route of `router`.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// - `behind_proxy = false` - client IP from the socket peer address
/// - `behind_proxy = true` - client IP from `X-Forwarded-For`, `X-Real-IP` or
///   `Forwarded`, falling back to the peer address; enable only behind a
///   trusted reverse proxy
///
/// Both require the server to be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn apply(router: Router<AppState>, limit: RateLimit, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(governor(SmartIpKeyExtractor, limit))
    } else {
        router.layer(governor(PeerIpKeyExtractor, limit))
    }
}

fn governor<K: KeyExtractor>(
    key_extractor: K,
    limit: RateLimit,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let (per_second, burst) = limit.quota();

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(per_second)
            .burst_size(burst)
            .finish()
            .expect("rate limit quotas are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
