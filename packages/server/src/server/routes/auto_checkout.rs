//! Auto-Checkout Pending surface (spec §6):
//! `POST /attendance/auto-checkout/propose`, `POST /attendance/auto-checkout/cancel`.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::common::entity_ids::AutoCheckoutPendingId;
use crate::common::error::{AppError, AppResult};
use crate::domains::auto_checkout::{cancel, propose, AutoCheckoutPending, CancelRequest, ProposeRequest};
use crate::server::app::AppState;
use crate::server::middleware::AuthedPrincipal;

#[derive(Debug, Serialize)]
pub struct ProposeResponse {
    pub pending_id: AutoCheckoutPendingId,
}

pub async fn propose_handler(
    AuthedPrincipal(principal): AuthedPrincipal,
    State(state): State<AppState>,
    Json(req): Json<ProposeRequest>,
) -> AppResult<Json<ProposeResponse>> {
    let pending = propose(&principal, req.attendance_log_id, req.reason, req.ends_at, &state.db_pool).await?;
    Ok(Json(ProposeResponse { pending_id: pending.id }))
}

/// P4 (cancel idempotence): a second cancel call matches no `PENDING` row
/// and `cancel` returns `None` — re-read the row so the response still
/// reflects its (unchanged) terminal state instead of surfacing `NotFound`.
pub async fn cancel_handler(
    AuthedPrincipal(principal): AuthedPrincipal,
    State(state): State<AppState>,
    Json(req): Json<CancelRequest>,
) -> AppResult<Json<AutoCheckoutPending>> {
    match cancel(&principal, req.pending_id, req.cancel_reason, &state.db_pool).await? {
        Some(pending) => Ok(Json(pending)),
        None => {
            let pending = AutoCheckoutPending::find_by_id(req.pending_id, &state.db_pool)
                .await
                .map_err(AppError::Internal)?
                .ok_or_else(|| AppError::NotFound("pending_id".to_string()))?;
            Ok(Json(pending))
        }
    }
}
