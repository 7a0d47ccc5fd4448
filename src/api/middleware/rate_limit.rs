//! Rate limiting middleware using token buckets keyed by client IP.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Rate limiter for the public resolve routes.
///
/// 2 requests per second with a burst of 60 per client IP. Requests over
/// the limit receive `429 Too Many Requests`.
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(60)
            .finish()
            .expect("valid governor config"),
    );

    GovernorLayer::new(governor_conf)
}

/// Stricter limiter for password submissions against protected links:
/// 1 request per second, burst of 5. This is the throttling policy for
/// repeated gate attempts; per-IP buckets were chosen over per-link
/// lockouts so an attacker cannot lock a victim's link by hammering it.
pub fn password_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(1)
            .burst_size(5)
            .finish()
            .expect("valid governor config"),
    );

    GovernorLayer::new(governor_conf)
}
