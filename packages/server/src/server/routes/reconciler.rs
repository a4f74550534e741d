//! `POST /internal/reconciler/run` (spec §6 "Scheduled invocation"): lets an
//! external scheduler trigger a reconciler pass out of band from the
//! in-process cron tick `server::app` also wires up. Idempotent (P7), so
//! overlapping the two invocation paths is harmless.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::domains::reconciler::run_once;
use crate::server::app::AppState;
use crate::server::middleware::SystemCredential;

#[derive(Debug, Serialize)]
pub struct ReconcilerRunResponse {
    pub processed: usize,
    pub closed_auto: usize,
    pub cancelled_log_not_found: usize,
    pub marked_done_already_closed: usize,
    pub cancelled_recovered_before_exec: usize,
    pub timed_out: usize,
}

pub async fn reconciler_run_handler(
    _system: SystemCredential,
    State(state): State<AppState>,
) -> Json<ReconcilerRunResponse> {
    let summary = run_once(&state.db_pool).await;

    Json(ReconcilerRunResponse {
        processed: summary.processed,
        closed_auto: summary.closed_auto,
        cancelled_log_not_found: summary.cancelled_log_not_found,
        marked_done_already_closed: summary.marked_done_already_closed,
        cancelled_recovered_before_exec: summary.cancelled_recovered_before_exec,
        timed_out: summary.timed_out,
    })
}
