//! Application wiring: `AppState`, the Axum router, and the in-process
//! reconciler cron tick (spec §4.6 "scheduled job ... or wired to a
//! scheduler tick").

use std::sync::Arc;
use std::time::Duration;

use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use axum::routing::{get, post};
use axum::Router;
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::auth::JwtService;
use crate::domains::company::SettingsCache;
use crate::domains::reconciler::run_once;
use crate::server::middleware::extract_client_ip;
use crate::server::routes::{
    cancel_handler, check_in_handler, check_out_handler, current_handler, dev_login_handler,
    health_handler, heartbeat_handler, propose_handler, reconciler_run_handler, settings_handler,
};

/// Shared application state threaded through every handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
    pub settings_cache: SettingsCache,
    /// Bearer credential compared against in `SystemCredential` (spec §6).
    pub system_reconciler_token: String,
    /// Gates `POST /auth/dev-login` (SPEC_FULL §10.5) — never true outside
    /// local development/test environments.
    pub dev_login_enabled: bool,
}

/// Build the Axum router for the attendance surface (spec §6).
pub fn build_router(state: AppState) -> Router {
    let attendance_routes = Router::new()
        .route("/attendance/check-in", post(check_in_handler))
        .route("/attendance/check-out", post(check_out_handler))
        .route("/attendance/current", get(current_handler))
        .route("/attendance/heartbeat", post(heartbeat_handler))
        .route("/attendance/auto-checkout/propose", post(propose_handler))
        .route("/attendance/auto-checkout/cancel", post(cancel_handler))
        .route("/attendance/settings", get(settings_handler))
        .layer(crate::server::middleware::attendance_rate_limit_layer());

    let internal_routes = Router::new().route("/internal/reconciler/run", post(reconciler_run_handler));

    let mut router = Router::new()
        .merge(attendance_routes)
        .merge(internal_routes)
        .route("/health", get(health_handler));

    if state.dev_login_enabled {
        router = router.route("/auth/dev-login", post(dev_login_handler));
    }

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    router
        .layer(axum::middleware::from_fn(extract_client_ip))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build `AppState` from a connected pool and loaded config.
pub fn build_state(pool: PgPool, config: &Config) -> AppState {
    AppState {
        db_pool: pool,
        jwt_service: Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone())),
        settings_cache: SettingsCache::new(),
        system_reconciler_token: config.system_reconciler_token.clone(),
        dev_login_enabled: config.dev_login_enabled,
    }
}

/// Spawn the reconciler's scheduled tick (spec §4.6, cadence `<= 1 min`).
/// Idempotent (P7), so this running alongside `POST /internal/reconciler/run`
/// is harmless even if both fire for the same due rows.
pub async fn spawn_reconciler_schedule(pool: PgPool, interval: Duration) -> anyhow::Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let pool = pool.clone();
        Box::pin(async move {
            let summary = run_once(&pool).await;
            tracing::info!(
                processed = summary.processed,
                closed_auto = summary.closed_auto,
                cancelled_log_not_found = summary.cancelled_log_not_found,
                marked_done_already_closed = summary.marked_done_already_closed,
                cancelled_recovered_before_exec = summary.cancelled_recovered_before_exec,
                timed_out = summary.timed_out,
                "reconciler tick complete"
            );
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    Ok(scheduler)
}
