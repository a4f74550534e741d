//! `AutoCheckoutPending` — a client-authored intent (spec §3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::entity_ids::{AttendanceLogId, AutoCheckoutPendingId, CompanyId, EmployeeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PendingReason {
    GpsBlocked,
    OutsideBranch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PendingStatus {
    Pending,
    Cancelled,
    Done,
}

/// Valid `cancel_reason` values (spec §4.4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    Recovered,
    RecoveredBeforeExec,
    Superseded,
    LogNotFound,
    ManualCheckout,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AutoCheckoutPending {
    pub id: AutoCheckoutPendingId,
    pub company_id: CompanyId,
    pub employee_id: EmployeeId,
    pub attendance_log_id: AttendanceLogId,
    pub reason: PendingReason,
    pub ends_at: DateTime<Utc>,
    pub status: PendingStatus,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancel_reason: Option<CancelReason>,
    pub done_at: Option<DateTime<Utc>>,
}

impl PendingReason {
    /// Maps a pending reason to the closed session's `checkout_reason`
    /// (spec §4.6: `GPS_BLOCKED -> LOCATION_DISABLED | OUTSIDE_BRANCH -> OUT_OF_BRANCH`).
    pub fn to_checkout_reason(self) -> crate::domains::attendance::CheckoutReason {
        match self {
            PendingReason::GpsBlocked => crate::domains::attendance::CheckoutReason::LocationDisabled,
            PendingReason::OutsideBranch => crate::domains::attendance::CheckoutReason::OutOfBranch,
        }
    }
}
