//! Heartbeat Sink surface (spec §6): `POST /attendance/heartbeat`.

use axum::extract::State;
use axum::Json;

use crate::common::error::AppResult;
use crate::domains::heartbeat::{upsert_heartbeat, HeartbeatRequest, LocationHeartbeat};
use crate::server::app::AppState;
use crate::server::middleware::AuthedPrincipal;

pub async fn heartbeat_handler(
    AuthedPrincipal(principal): AuthedPrincipal,
    State(state): State<AppState>,
    Json(req): Json<HeartbeatRequest>,
) -> AppResult<Json<LocationHeartbeat>> {
    let heartbeat = upsert_heartbeat(&principal, req, &state.db_pool).await?;
    Ok(Json(heartbeat))
}
