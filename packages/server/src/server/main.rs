//! Attendance Lifecycle Core — server entry point.

use anyhow::{Context, Result};
use server_core::server::app::{build_router, build_state, spawn_reconciler_schedule};
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("starting attendance lifecycle core");

    let config = Config::from_env().context("failed to load configuration")?;
    tracing::info!("configuration loaded");

    tracing::info!("connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    tracing::info!("database connected");

    tracing::info!("running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;
    tracing::info!("migrations complete");

    // Reconciler cron tick (spec §4.6). Kept alive for the process lifetime;
    // dropping it would stop the scheduler.
    let _scheduler = spawn_reconciler_schedule(
        pool.clone(),
        std::time::Duration::from_secs(config.reconciler_interval_seconds),
    )
    .await
    .context("failed to start reconciler schedule")?;

    let state = build_state(pool, &config);
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(%addr, "starting server");
    tracing::info!("health check: http://{addr}/health");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("server error")?;

    Ok(())
}
