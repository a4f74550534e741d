//! `GET /attendance/settings` — the effective `CompanySettings` for the
//! caller's company (spec §3 "CompanySettings"), read through the TTL cache
//! (spec §5: "Settings reads are hot and may be cached per company for up
//! to one minute").
//!
//! Not one of the admin CRUD endpoints spec §1 puts out of scope — this is
//! the read the auto-checkout client FSM needs to learn `N`/`T` (spec
//! §4.4's debounce parameters) without reaching into the admin surface.

use axum::extract::State;
use axum::Json;

use crate::common::error::{AppError, AppResult};
use crate::domains::company::CompanySettings;
use crate::server::app::AppState;
use crate::server::middleware::AuthedPrincipal;

pub async fn settings_handler(
    AuthedPrincipal(principal): AuthedPrincipal,
    State(state): State<AppState>,
) -> AppResult<Json<CompanySettings>> {
    let settings = state
        .settings_cache
        .get(principal.company_id, &state.db_pool)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound("company_settings".to_string()))?;

    Ok(Json(settings))
}
