//! Admission Controller surface (spec §6):
//! `POST /attendance/check-in`, `POST /attendance/check-out`, `GET /attendance/current`.

use axum::extract::State;
use axum::Json;

use crate::common::error::AppResult;
use crate::domains::attendance::{check_in, check_out, current, AttendanceLog, CheckInRequest, CheckOutRequest};
use crate::server::app::AppState;
use crate::server::middleware::AuthedPrincipal;

pub async fn check_in_handler(
    AuthedPrincipal(principal): AuthedPrincipal,
    State(state): State<AppState>,
    Json(req): Json<CheckInRequest>,
) -> AppResult<Json<AttendanceLog>> {
    let session = check_in(&principal, req, &state.db_pool).await?;
    Ok(Json(session))
}

pub async fn check_out_handler(
    AuthedPrincipal(principal): AuthedPrincipal,
    State(state): State<AppState>,
    Json(req): Json<CheckOutRequest>,
) -> AppResult<Json<AttendanceLog>> {
    let session = check_out(&principal, req, &state.db_pool).await?;
    Ok(Json(session))
}

pub async fn current_handler(
    AuthedPrincipal(principal): AuthedPrincipal,
    State(state): State<AppState>,
) -> AppResult<Json<Option<AttendanceLog>>> {
    let session = current(&principal, &state.db_pool).await?;
    Ok(Json(session))
}
