//! Admission Controller (C2, spec §4.2): check-in/check-out request handling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::error::AppError;
use crate::common::geo::{haversine_distance_m, validate_coordinates};
use crate::common::principal::Principal;
use crate::domains::auto_checkout::{AutoCheckoutPending, CancelReason};
use crate::domains::company::{Branch, Company, Employee, Shift};
use crate::domains::heartbeat::LocationHeartbeat;

use super::models::{AttendanceLog, AttendanceStatus};
use super::repository::NewSession;

#[derive(Debug, Clone, Deserialize)]
pub struct CheckInRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: f64,
    pub device_time: DateTime<Utc>,
    pub device_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutSource {
    Manual,
    /// Permitted only on the reconciler's internal path (spec §4.2); the
    /// public `/attendance/check-out` endpoint always supplies `Manual`.
    Auto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckOutRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy_m: Option<f64>,
    #[serde(default = "default_checkout_source")]
    pub source: CheckOutSource,
}

fn default_checkout_source() -> CheckOutSource {
    CheckOutSource::Manual
}

/// Check-in algorithm (spec §4.2).
pub async fn check_in(
    principal: &Principal,
    req: CheckInRequest,
    pool: &PgPool,
) -> Result<AttendanceLog, AppError> {
    validate_coordinates(req.latitude, req.longitude)
        .map_err(AppError::Validation)?;
    if req.accuracy_m < 0.0 {
        return Err(AppError::Validation("accuracy_m must be >= 0".to_string()));
    }

    let employee_id = principal.employee_id().ok_or(AppError::Forbidden)?;

    // 1. Resolve employee; reject if inactive.
    let employee = Employee::find_by_id(employee_id, pool)
        .await
        .map_err(AppError::Internal)?
        .ok_or(AppError::Unauthenticated)?;
    if !employee.is_active {
        return Err(AppError::EmployeeInactive);
    }

    // 2. Resolve branch; reject if missing or inactive.
    let branch = Branch::find_by_id(employee.branch_id, employee.company_id, pool)
        .await
        .map_err(AppError::Internal)?
        .filter(|b| b.is_active)
        .ok_or(AppError::BranchUnavailable)?;

    // 3. Geofence check.
    let distance_m = haversine_distance_m(req.latitude, req.longitude, branch.latitude, branch.longitude);
    if distance_m > branch.geofence_radius_m {
        return Err(AppError::OutOfGeofence { distance_m });
    }

    // 5. Lateness (done before insert so the guarded insert carries the final row).
    let now = Utc::now();
    let (status, late_minutes) = compute_lateness(&employee, now, pool).await?;

    // 4 + 6. Guarded insert inside a serializable transaction (spec step 4, 6).
    let new_session = NewSession {
        company_id: employee.company_id,
        employee_id: employee.id,
        branch_id: branch.id,
        check_in_time: now,
        check_in_device_time: req.device_time,
        check_in_lat: req.latitude,
        check_in_lng: req.longitude,
        check_in_accuracy_m: req.accuracy_m,
        check_in_distance_m: distance_m,
        status,
        late_minutes,
    };

    AttendanceLog::insert_guarded(new_session, pool).await
}

async fn compute_lateness(
    employee: &Employee,
    check_in_time: DateTime<Utc>,
    pool: &PgPool,
) -> Result<(AttendanceStatus, i32), AppError> {
    let Some(shift_id) = employee.shift_id else {
        return Ok((AttendanceStatus::OnTime, 0));
    };

    let shift = Shift::find_by_id(shift_id, employee.company_id, pool)
        .await
        .map_err(AppError::Internal)?;
    let Some(shift) = shift else {
        return Ok((AttendanceStatus::OnTime, 0));
    };

    let company = Company::find_by_id(employee.company_id, pool)
        .await
        .map_err(AppError::Internal)?
        .ok_or(AppError::Unauthenticated)?;
    let tz: chrono_tz::Tz = company.timezone.parse().unwrap_or(chrono_tz::Tz::UTC);

    let today = crate::common::time::company_day(check_in_time, tz);
    let scheduled_start = crate::common::time::on_company_day(today, shift.start_time, tz);

    let raw_late = crate::common::time::minutes_late(scheduled_start, check_in_time);
    let late_minutes = (raw_late - shift.grace_minutes as i64).max(0);

    let status = if late_minutes > 0 {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::OnTime
    };

    Ok((status, late_minutes as i32))
}

/// Check-out algorithm (spec §4.2). Returns `NotCheckedIn` when there is no
/// open session — per spec §7 this is non-terminal from the client's point
/// of view; it handles it idempotently by adopting the server's view.
pub async fn check_out(
    principal: &Principal,
    req: CheckOutRequest,
    pool: &PgPool,
) -> Result<AttendanceLog, AppError> {
    if req.source != CheckOutSource::Manual {
        return Err(AppError::Forbidden);
    }

    let employee_id = principal.employee_id().ok_or(AppError::Forbidden)?;

    let open = match AttendanceLog::find_open(employee_id, pool)
        .await
        .map_err(AppError::Internal)?
    {
        Some(open) => open,
        None => return idempotent_replay(employee_id, pool).await,
    };

    let mut tx = pool.begin().await.map_err(AppError::Database)?;

    let now = Utc::now();
    let closed = sqlx::query_as::<_, AttendanceLog>(
        "UPDATE attendance_logs
         SET check_out_time = $2, check_out_lat = $3, check_out_lng = $4, checkout_type = $5
         WHERE id = $1
         RETURNING *",
    )
    .bind(open.id)
    .bind(now)
    .bind(req.latitude)
    .bind(req.longitude)
    .bind(super::models::CheckoutType::Manual)
    .fetch_one(&mut *tx)
    .await
    .map_err(AppError::Database)?;

    AutoCheckoutPending::cancel_for_log(open.id, CancelReason::ManualCheckout, &mut tx)
        .await
        .map_err(AppError::Internal)?;

    tx.commit().await.map_err(AppError::Database)?;

    LocationHeartbeat::delete(employee_id, open.id, pool)
        .await
        .map_err(AppError::Internal)?;

    Ok(closed)
}

/// Spec §4.2 check-out step 1: a retry after a successful checkout must not
/// surface as an error — adopt the server's view by returning today's
/// already-closed session instead of `NotCheckedIn`, when one exists.
async fn idempotent_replay(
    employee_id: crate::common::entity_ids::EmployeeId,
    pool: &PgPool,
) -> Result<AttendanceLog, AppError> {
    let employee = Employee::find_by_id(employee_id, pool)
        .await
        .map_err(AppError::Internal)?
        .ok_or(AppError::Unauthenticated)?;
    let company = Company::find_by_id(employee.company_id, pool)
        .await
        .map_err(AppError::Internal)?
        .ok_or(AppError::Unauthenticated)?;
    let tz: chrono_tz::Tz = company.timezone.parse().unwrap_or(chrono_tz::Tz::UTC);
    let today = crate::common::time::company_day(Utc::now(), tz);

    AttendanceLog::find_latest_closed_on_day(employee_id, today, tz, pool)
        .await
        .map_err(AppError::Internal)?
        .ok_or(AppError::NotCheckedIn)
}

/// `GET /attendance/current` (spec §6): the caller's open session, if any.
pub async fn current(
    principal: &Principal,
    pool: &PgPool,
) -> Result<Option<AttendanceLog>, AppError> {
    let employee_id = principal.employee_id().ok_or(AppError::Forbidden)?;
    AttendanceLog::find_open(employee_id, pool)
        .await
        .map_err(AppError::Internal)
}

