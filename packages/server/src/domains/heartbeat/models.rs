//! `LocationHeartbeat` (spec §3, §4.5): one row per `(employee_id, attendance_log_id)`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::common::entity_ids::{AttendanceLogId, EmployeeId};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct LocationHeartbeat {
    pub employee_id: EmployeeId,
    pub attendance_log_id: AttendanceLogId,
    pub last_seen_at: DateTime<Utc>,
    pub in_branch: bool,
    pub gps_ok: bool,
    pub reason: Option<String>,
}

/// "Fresh" staleness window (spec §4.5): `last_seen_at >= now - 2 minutes`.
pub const FRESHNESS_WINDOW: Duration = Duration::minutes(2);

impl LocationHeartbeat {
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.last_seen_at >= now - FRESHNESS_WINDOW
    }
}
