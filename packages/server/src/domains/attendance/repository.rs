//! Attendance Ledger (C3, spec §4.3): append-then-mutate session store.
//!
//! `InsertSession`/`CloseSession` rely on the partial unique index
//! `(employee_id) WHERE check_out_time IS NULL` (spec §9) to guarantee P1
//! ("one open session per employee") under concurrent writers — this
//! repository never takes its own advisory lock, it lets the constraint do
//! the work and maps the resulting unique-violation to `AlreadyCheckedIn`.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::entity_ids::{AttendanceLogId, BranchId, CompanyId, EmployeeId};
use crate::common::error::AppError;

use super::models::{AttendanceLog, AttendanceStatus, CheckoutReason, CheckoutType};

/// One calendar day's distinct-day projection row (spec §4.3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinctDay {
    pub day: NaiveDate,
    pub max_late_minutes: i32,
}

#[allow(clippy::too_many_arguments)]
pub struct NewSession {
    pub company_id: CompanyId,
    pub employee_id: EmployeeId,
    pub branch_id: BranchId,
    pub check_in_time: DateTime<Utc>,
    pub check_in_device_time: DateTime<Utc>,
    pub check_in_lat: f64,
    pub check_in_lng: f64,
    pub check_in_accuracy_m: f64,
    pub check_in_distance_m: f64,
    pub status: AttendanceStatus,
    pub late_minutes: i32,
}

impl AttendanceLog {
    /// The employee's single open session, if any (P1: at most one exists).
    pub async fn find_open(employee_id: EmployeeId, pool: &PgPool) -> anyhow::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM attendance_logs WHERE employee_id = $1 AND check_out_time IS NULL",
        )
        .bind(employee_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Same as [`find_open`](Self::find_open), but inside a transaction and
    /// with `FOR UPDATE` so the admission check-and-insert is atomic even
    /// without relying solely on the unique index (spec §4.3 concurrency).
    async fn find_open_for_update(
        employee_id: EmployeeId,
        tx: &mut Transaction<'_, Postgres>,
    ) -> anyhow::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM attendance_logs WHERE employee_id = $1 AND check_out_time IS NULL FOR UPDATE",
        )
        .bind(employee_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(Into::into)
    }

    pub async fn list(
        company_id: CompanyId,
        employee_id: EmployeeId,
        from: NaiveDate,
        to: NaiveDate,
        pool: &PgPool,
    ) -> anyhow::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM attendance_logs
             WHERE company_id = $1 AND employee_id = $2
               AND check_in_time::date BETWEEN $3 AND $4
             ORDER BY check_in_time ASC",
        )
        .bind(company_id)
        .bind(employee_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert a session within a serializable transaction, re-checking for
    /// an open session under `FOR UPDATE` first (spec §4.2 step 4).
    ///
    /// Returns `AlreadyCheckedIn` with the existing open session if one is
    /// found, instead of letting the unique-index violation surface as an
    /// opaque database error.
    pub async fn insert_guarded(new: NewSession, pool: &PgPool) -> Result<Self, AppError> {
        let mut tx = pool.begin().await.map_err(AppError::Database)?;

        if let Some(existing) = Self::find_open_for_update(new.employee_id, &mut tx)
            .await
            .map_err(AppError::Internal)?
        {
            return Err(AppError::AlreadyCheckedIn {
                attendance_log_id: existing.id.into_uuid(),
            });
        }

        let inserted = sqlx::query_as::<_, Self>(
            "INSERT INTO attendance_logs (
                id, company_id, employee_id, branch_id,
                check_in_time, check_in_device_time,
                check_in_lat, check_in_lng, check_in_accuracy_m, check_in_distance_m,
                status, late_minutes
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING *",
        )
        .bind(AttendanceLogId::new())
        .bind(new.company_id)
        .bind(new.employee_id)
        .bind(new.branch_id)
        .bind(new.check_in_time)
        .bind(new.check_in_device_time)
        .bind(new.check_in_lat)
        .bind(new.check_in_lng)
        .bind(new.check_in_accuracy_m)
        .bind(new.check_in_distance_m)
        .bind(new.status)
        .bind(new.late_minutes)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(inserted)
    }

    /// Close the session with a manual checkout (spec §4.2 check-out steps 2-4).
    pub async fn close_manual(
        id: AttendanceLogId,
        check_out_time: DateTime<Utc>,
        lat: Option<f64>,
        lng: Option<f64>,
        pool: &PgPool,
    ) -> anyhow::Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE attendance_logs
             SET check_out_time = $2, check_out_lat = $3, check_out_lng = $4,
                 checkout_type = $5
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(check_out_time)
        .bind(lat)
        .bind(lng)
        .bind(CheckoutType::Manual)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Close the session via the reconciler's auto-checkout (spec §4.6).
    pub async fn close_auto(
        id: AttendanceLogId,
        check_out_time: DateTime<Utc>,
        reason: CheckoutReason,
        tx: &mut Transaction<'_, Postgres>,
    ) -> anyhow::Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE attendance_logs
             SET check_out_time = $2, checkout_type = $3, checkout_reason = $4
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(check_out_time)
        .bind(CheckoutType::Auto)
        .bind(reason)
        .fetch_one(&mut **tx)
        .await
        .map_err(Into::into)
    }

    /// The most recently closed session for `employee_id` on `company_day`
    /// (company TZ), used to make check-out idempotent (spec §4.2 check-out
    /// step 1: "if the client retries after success, return the closed
    /// session").
    pub async fn find_latest_closed_on_day(
        employee_id: EmployeeId,
        company_day: NaiveDate,
        tz: chrono_tz::Tz,
        pool: &PgPool,
    ) -> anyhow::Result<Option<Self>> {
        // `check_in_time::date` alone would be wrong outside UTC; the
        // session's "day" (spec §3) is evaluated in the company timezone,
        // so the candidates are narrowed with a generous UTC window and the
        // exact boundary is re-checked in Rust against `tz`.
        let day_start_utc = crate::common::time::on_company_day(
            company_day,
            chrono::NaiveTime::MIN,
            tz,
        ) - chrono::Duration::hours(24);
        let day_end_utc = crate::common::time::on_company_day(
            company_day,
            chrono::NaiveTime::MIN,
            tz,
        ) + chrono::Duration::hours(48);

        let candidates = sqlx::query_as::<_, Self>(
            "SELECT * FROM attendance_logs
             WHERE employee_id = $1 AND check_out_time IS NOT NULL
               AND check_in_time BETWEEN $2 AND $3
             ORDER BY check_out_time DESC",
        )
        .bind(employee_id)
        .bind(day_start_utc)
        .bind(day_end_utc)
        .fetch_all(pool)
        .await?;

        Ok(candidates
            .into_iter()
            .find(|log| crate::common::time::company_day(log.check_in_time, tz) == company_day))
    }

    /// Re-read a session inside a transaction (spec §4.6 reconciler step: "re-read the target AttendanceLog").
    pub async fn find_by_id_tx(
        id: AttendanceLogId,
        tx: &mut Transaction<'_, Postgres>,
    ) -> anyhow::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM attendance_logs WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(Into::into)
    }
}

/// Distinct-day projection (spec §4.3, §4.7, P5): collapses multiple sessions
/// on the same company-day into one day with the worst-case lateness.
pub fn project_distinct_days(
    sessions: &[AttendanceLog],
    tz: chrono_tz::Tz,
) -> Vec<DistinctDay> {
    use std::collections::BTreeMap;

    let mut by_day: BTreeMap<NaiveDate, i32> = BTreeMap::new();
    for session in sessions {
        let day = crate::common::time::company_day(session.check_in_time, tz);
        let entry = by_day.entry(day).or_insert(0);
        *entry = (*entry).max(session.late_minutes);
    }

    by_day
        .into_iter()
        .map(|(day, max_late_minutes)| DistinctDay {
            day,
            max_late_minutes,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::entity_ids::{AttendanceLogId, BranchId, CompanyId, EmployeeId};
    use chrono::TimeZone;

    fn sample(day: chrono::DateTime<Utc>, late: i32) -> AttendanceLog {
        AttendanceLog {
            id: AttendanceLogId::new(),
            company_id: CompanyId::new(),
            employee_id: EmployeeId::new(),
            branch_id: BranchId::new(),
            check_in_time: day,
            check_in_device_time: day,
            check_in_lat: 0.0,
            check_in_lng: 0.0,
            check_in_accuracy_m: 5.0,
            check_in_distance_m: 1.0,
            check_out_time: Some(day),
            check_out_lat: None,
            check_out_lng: None,
            checkout_type: Some(CheckoutType::Manual),
            checkout_reason: None,
            status: if late > 0 { AttendanceStatus::Late } else { AttendanceStatus::OnTime },
            late_minutes: late,
        }
    }

    #[test]
    fn distinct_day_collapses_same_day_sessions_to_worst_case_lateness() {
        let tz = chrono_tz::Tz::UTC;
        let d1 = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
        let d1b = Utc.with_ymd_and_hms(2026, 1, 5, 14, 0, 0).unwrap();
        let d2 = Utc.with_ymd_and_hms(2026, 1, 8, 9, 0, 0).unwrap();

        let sessions = vec![sample(d1, 10), sample(d1b, 40), sample(d2, 0)];
        let days = project_distinct_days(&sessions, tz);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].max_late_minutes, 40);
        assert_eq!(days[1].max_late_minutes, 0);
    }
}
