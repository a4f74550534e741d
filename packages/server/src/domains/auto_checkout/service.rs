//! Server-side surface for the client-driven auto-checkout FSM (spec §6:
//! `POST /attendance/auto-checkout/propose`, `.../cancel`).
//!
//! The server never runs the FSM itself (spec §4.4 header) — it only
//! persists the `PENDING` row the client's FSM decided to create or cancel,
//! after checking the row it targets actually belongs to the caller.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;

use crate::common::entity_ids::{AttendanceLogId, AutoCheckoutPendingId};
use crate::common::error::AppError;
use crate::common::principal::Principal;
use crate::domains::attendance::AttendanceLog;
use crate::domains::auth::require_self;

use super::models::{AutoCheckoutPending, CancelReason, PendingReason};

#[derive(Debug, Clone, Deserialize)]
pub struct ProposeRequest {
    pub attendance_log_id: AttendanceLogId,
    pub reason: PendingReason,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelRequest {
    pub pending_id: AutoCheckoutPendingId,
    pub cancel_reason: PublicCancelReason,
}

/// `cancel_reason` values a public client is allowed to submit (spec §6);
/// the rest (`RECOVERED_BEFORE_EXEC`, `SUPERSEDED` via re-propose,
/// `LOG_NOT_FOUND`, `MANUAL_CHECKOUT`) are reconciler/checkout-internal
/// (spec §4.4.2, §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicCancelReason {
    Recovered,
    Superseded,
}

impl From<PublicCancelReason> for CancelReason {
    fn from(value: PublicCancelReason) -> Self {
        match value {
            PublicCancelReason::Recovered => CancelReason::Recovered,
            PublicCancelReason::Superseded => CancelReason::Superseded,
        }
    }
}

pub async fn propose(
    principal: &Principal,
    attendance_log_id: AttendanceLogId,
    reason: PendingReason,
    ends_at: DateTime<Utc>,
    pool: &PgPool,
) -> Result<AutoCheckoutPending, AppError> {
    let log = AttendanceLog::find_open(
        principal.employee_id().ok_or(AppError::Forbidden)?,
        pool,
    )
    .await
    .map_err(AppError::Internal)?
    .filter(|log| log.id == attendance_log_id)
    .ok_or_else(|| AppError::NotFound("attendance_log_id".to_string()))?;

    require_self(principal, log.employee_id)?;

    AutoCheckoutPending::create_superseding(
        log.company_id,
        log.employee_id,
        log.id,
        reason,
        ends_at,
        pool,
    )
    .await
    .map_err(AppError::Internal)
}

pub async fn cancel(
    principal: &Principal,
    pending_id: AutoCheckoutPendingId,
    reason: PublicCancelReason,
    pool: &PgPool,
) -> Result<Option<AutoCheckoutPending>, AppError> {
    let pending = AutoCheckoutPending::find_by_id(pending_id, pool)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound("pending_id".to_string()))?;

    require_self(principal, pending.employee_id)?;

    AutoCheckoutPending::cancel(pending_id, reason.into(), pool)
        .await
        .map_err(AppError::Internal)
}
