//! The attendance session ledger entity (spec §3 "AttendanceLog").

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::entity_ids::{AttendanceLogId, BranchId, CompanyId, EmployeeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CheckoutType {
    Manual,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    OnTime,
    Late,
}

/// Why an auto-checkout fired, mapped from the pending row's `reason`
/// (spec §4.6: `GPS_BLOCKED -> LOCATION_DISABLED`, `OUTSIDE_BRANCH -> OUT_OF_BRANCH`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CheckoutReason {
    LocationDisabled,
    OutOfBranch,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AttendanceLog {
    pub id: AttendanceLogId,
    pub company_id: CompanyId,
    pub employee_id: EmployeeId,
    pub branch_id: BranchId,

    pub check_in_time: DateTime<Utc>,
    pub check_in_device_time: DateTime<Utc>,
    pub check_in_lat: f64,
    pub check_in_lng: f64,
    pub check_in_accuracy_m: f64,
    pub check_in_distance_m: f64,

    pub check_out_time: Option<DateTime<Utc>>,
    pub check_out_lat: Option<f64>,
    pub check_out_lng: Option<f64>,
    pub checkout_type: Option<CheckoutType>,
    pub checkout_reason: Option<CheckoutReason>,

    pub status: AttendanceStatus,
    pub late_minutes: i32,
}

impl AttendanceLog {
    pub fn is_open(&self) -> bool {
        self.check_out_time.is_none()
    }
}
