//! Application configuration loaded from environment variables
//! (SPEC_FULL §10.3), grounded on the teacher's `Config::from_env` pattern.

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,

    /// HMAC secret for employee/admin session JWTs (domains::auth::jwt).
    pub jwt_secret: String,
    pub jwt_issuer: String,

    /// Cron cadence for the reconciler tick (spec §4.6: `*/1 * * * *` or
    /// any tick <= 1 min); expressed in seconds for simplicity.
    pub reconciler_interval_seconds: u64,

    /// Bearer credential the system uses to call
    /// `POST /internal/reconciler/run` out of band from the cron tick
    /// (spec §6 "Scheduled invocation").
    pub system_reconciler_token: String,

    /// Gates `POST /auth/dev-login` (SPEC_FULL §10.5). Defaults to off;
    /// only local/test environments should set `DEV_LOGIN_ENABLED=true`.
    pub dev_login_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "attendance-core".to_string()),
            reconciler_interval_seconds: env::var("RECONCILER_INTERVAL_SECONDS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .context("RECONCILER_INTERVAL_SECONDS must be a valid number")?,
            system_reconciler_token: env::var("SYSTEM_RECONCILER_TOKEN")
                .context("SYSTEM_RECONCILER_TOKEN must be set")?,
            dev_login_enabled: env::var("DEV_LOGIN_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}
