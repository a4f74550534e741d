//! Rate limiting via `tower_governor`, grounded on the teacher's
//! `GovernorConfigBuilder` usage in `server/app.rs`.
//!
//! Applied to the whole attendance surface: 10 requests/sec per IP with a
//! burst of 20 is enough headroom for the 15s heartbeat cadence (spec §4.5)
//! while still bounding abusive clients. Disabled in debug builds, same as
//! the teacher, since local development traffic shares one IP.

use std::sync::Arc;

use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::GovernorLayer;

pub fn attendance_rate_limit_layer() -> GovernorLayer {
    let config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .use_headers()
            .finish()
            .expect("rate limiter configuration is valid and should never fail"),
    );

    GovernorLayer { config }
}
