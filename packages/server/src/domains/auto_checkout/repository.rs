//! Persistence for `AutoCheckoutPending` (spec §4.4.1, §4.4.2).

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::entity_ids::{AttendanceLogId, AutoCheckoutPendingId, CompanyId, EmployeeId};

use super::models::{AutoCheckoutPending, CancelReason, PendingReason, PendingStatus};

impl AutoCheckoutPending {
    pub async fn find_by_id(id: AutoCheckoutPendingId, pool: &PgPool) -> anyhow::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM auto_checkout_pending WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// The current `PENDING` row for `(employee_id, attendance_log_id)`, if any
    /// (spec §3 invariant: at most one at a time).
    pub async fn find_pending_for_log(
        employee_id: EmployeeId,
        attendance_log_id: AttendanceLogId,
        pool: &PgPool,
    ) -> anyhow::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM auto_checkout_pending
             WHERE employee_id = $1 AND attendance_log_id = $2 AND status = $3",
        )
        .bind(employee_id)
        .bind(attendance_log_id)
        .bind(PendingStatus::Pending)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// "Supersede then insert" (spec §4.4.1): cancel any prior `PENDING` row
    /// for this `(employee_id, attendance_log_id)` with `SUPERSEDED`, then
    /// insert the fresh proposal. `ends_at` is set once here and never
    /// mutated afterwards (P3).
    pub async fn create_superseding(
        company_id: CompanyId,
        employee_id: EmployeeId,
        attendance_log_id: AttendanceLogId,
        reason: PendingReason,
        ends_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> anyhow::Result<Self> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE auto_checkout_pending
             SET status = $4, cancelled_at = now(), cancel_reason = $5
             WHERE employee_id = $1 AND attendance_log_id = $2 AND status = $3",
        )
        .bind(employee_id)
        .bind(attendance_log_id)
        .bind(PendingStatus::Pending)
        .bind(PendingStatus::Cancelled)
        .bind(CancelReason::Superseded)
        .execute(&mut *tx)
        .await?;

        let inserted = sqlx::query_as::<_, Self>(
            "INSERT INTO auto_checkout_pending (
                id, company_id, employee_id, attendance_log_id, reason, ends_at, status
             ) VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(AutoCheckoutPendingId::new())
        .bind(company_id)
        .bind(employee_id)
        .bind(attendance_log_id)
        .bind(reason)
        .bind(ends_at)
        .bind(PendingStatus::Pending)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(inserted)
    }

    /// Cancel is an idempotent `UPDATE ... WHERE status = PENDING` (spec
    /// §4.4.2, P4): cancelling twice is a no-op the second time and leaves
    /// the original `cancel_reason`/`cancelled_at` untouched.
    pub async fn cancel(
        id: AutoCheckoutPendingId,
        reason: CancelReason,
        pool: &PgPool,
    ) -> anyhow::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE auto_checkout_pending
             SET status = $2, cancelled_at = now(), cancel_reason = $3
             WHERE id = $1 AND status = $4
             RETURNING *",
        )
        .bind(id)
        .bind(PendingStatus::Cancelled)
        .bind(reason)
        .bind(PendingStatus::Pending)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Cancel-by-log, used by manual checkout (spec §4.2 check-out step 3:
    /// cancel any `PENDING` rows for `attendance_log_id` with `MANUAL_CHECKOUT`)
    /// inside the same transaction as the checkout itself.
    pub async fn cancel_for_log(
        attendance_log_id: AttendanceLogId,
        reason: CancelReason,
        tx: &mut Transaction<'_, Postgres>,
    ) -> anyhow::Result<u64> {
        let result = sqlx::query(
            "UPDATE auto_checkout_pending
             SET status = $2, cancelled_at = now(), cancel_reason = $3
             WHERE attendance_log_id = $1 AND status = $4",
        )
        .bind(attendance_log_id)
        .bind(PendingStatus::Cancelled)
        .bind(reason)
        .bind(PendingStatus::Pending)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected())
    }

    /// `PENDING` rows whose `ends_at` has passed, ordered ascending (spec §4.6
    /// "Ordering / fairness"). System-wide; no tenant filter (each row
    /// carries its own `company_id`).
    pub async fn list_due(now: DateTime<Utc>, pool: &PgPool) -> anyhow::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM auto_checkout_pending
             WHERE status = $1 AND ends_at <= $2
             ORDER BY ends_at ASC",
        )
        .bind(PendingStatus::Pending)
        .bind(now)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Mark `DONE` within the reconciler's per-row transaction.
    pub async fn mark_done_tx(
        id: AutoCheckoutPendingId,
        tx: &mut Transaction<'_, Postgres>,
    ) -> anyhow::Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE auto_checkout_pending SET status = $2, done_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(PendingStatus::Done)
        .fetch_one(&mut **tx)
        .await
        .map_err(Into::into)
    }

    /// Cancel within the reconciler's per-row transaction.
    pub async fn cancel_tx(
        id: AutoCheckoutPendingId,
        reason: CancelReason,
        tx: &mut Transaction<'_, Postgres>,
    ) -> anyhow::Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE auto_checkout_pending
             SET status = $2, cancelled_at = now(), cancel_reason = $3
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(PendingStatus::Cancelled)
        .bind(reason)
        .fetch_one(&mut **tx)
        .await
        .map_err(Into::into)
    }
}
