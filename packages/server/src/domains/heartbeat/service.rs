//! `UpsertHeartbeat` entry point (spec §4.5, §6 `POST /attendance/heartbeat`).

use serde::Deserialize;
use sqlx::PgPool;

use crate::common::entity_ids::AttendanceLogId;
use crate::common::error::AppError;
use crate::common::principal::Principal;
use crate::domains::attendance::AttendanceLog;
use crate::domains::auth::require_self;

use super::models::LocationHeartbeat;

#[derive(Debug, Clone, Deserialize)]
pub struct HeartbeatRequest {
    pub attendance_log_id: AttendanceLogId,
    pub in_branch: bool,
    pub gps_ok: bool,
    pub reason: Option<String>,
}

pub async fn upsert_heartbeat(
    principal: &Principal,
    req: HeartbeatRequest,
    pool: &PgPool,
) -> Result<LocationHeartbeat, AppError> {
    let employee_id = principal.employee_id().ok_or(AppError::Forbidden)?;

    let open = AttendanceLog::find_open(employee_id, pool)
        .await
        .map_err(AppError::Internal)?
        .filter(|log| log.id == req.attendance_log_id)
        .ok_or_else(|| AppError::NotFound("attendance_log_id".to_string()))?;

    require_self(principal, open.employee_id)?;

    LocationHeartbeat::upsert(
        employee_id,
        req.attendance_log_id,
        req.in_branch,
        req.gps_ok,
        req.reason,
        pool,
    )
    .await
    .map_err(AppError::Internal)
}
