//! Heartbeat Sink persistence (C5, spec §4.5): idempotent upsert, latest-write-wins.

use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::entity_ids::{AttendanceLogId, EmployeeId};

use super::models::LocationHeartbeat;

impl LocationHeartbeat {
    pub async fn upsert(
        employee_id: EmployeeId,
        attendance_log_id: AttendanceLogId,
        in_branch: bool,
        gps_ok: bool,
        reason: Option<String>,
        pool: &PgPool,
    ) -> anyhow::Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO location_heartbeats (employee_id, attendance_log_id, last_seen_at, in_branch, gps_ok, reason)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (employee_id, attendance_log_id)
             DO UPDATE SET last_seen_at = EXCLUDED.last_seen_at,
                           in_branch = EXCLUDED.in_branch,
                           gps_ok = EXCLUDED.gps_ok,
                           reason = EXCLUDED.reason
             RETURNING *",
        )
        .bind(employee_id)
        .bind(attendance_log_id)
        .bind(Utc::now())
        .bind(in_branch)
        .bind(gps_ok)
        .bind(reason)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find(
        employee_id: EmployeeId,
        attendance_log_id: AttendanceLogId,
        pool: &PgPool,
    ) -> anyhow::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM location_heartbeats WHERE employee_id = $1 AND attendance_log_id = $2",
        )
        .bind(employee_id)
        .bind(attendance_log_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Inside the reconciler's per-row transaction (spec §4.6).
    pub async fn find_tx(
        employee_id: EmployeeId,
        attendance_log_id: AttendanceLogId,
        tx: &mut Transaction<'_, Postgres>,
    ) -> anyhow::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM location_heartbeats WHERE employee_id = $1 AND attendance_log_id = $2",
        )
        .bind(employee_id)
        .bind(attendance_log_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(Into::into)
    }

    /// Cleared when the session closes (spec §3 "Retention").
    pub async fn delete(
        employee_id: EmployeeId,
        attendance_log_id: AttendanceLogId,
        pool: &PgPool,
    ) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM location_heartbeats WHERE employee_id = $1 AND attendance_log_id = $2")
            .bind(employee_id)
            .bind(attendance_log_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn delete_tx(
        employee_id: EmployeeId,
        attendance_log_id: AttendanceLogId,
        tx: &mut Transaction<'_, Postgres>,
    ) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM location_heartbeats WHERE employee_id = $1 AND attendance_log_id = $2")
            .bind(employee_id)
            .bind(attendance_log_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
