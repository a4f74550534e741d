//! Reconciler (C6, spec §4.6): the scheduled job that materializes pending
//! auto-checkouts into closed sessions after a final-gate check.
//!
//! Idempotent by construction (P7): every branch either advances a
//! `PENDING` row to a terminal status or leaves it untouched for the next
//! tick, and re-running the whole pass twice converges to the same result.

use std::time::Duration as StdDuration;

use sqlx::PgPool;

use crate::domains::attendance::{AttendanceLog, CheckoutReason};
use crate::domains::auto_checkout::{AutoCheckoutPending, CancelReason};
use crate::domains::heartbeat::{LocationHeartbeat, FRESHNESS_WINDOW};

/// Per-row wall-clock budget before a row is rolled back and retried next
/// tick (spec §5 "Cancellation & timeouts").
const ROW_TIMEOUT: StdDuration = StdDuration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    ClosedAuto,
    CancelledLogNotFound,
    MarkedDoneAlreadyClosed,
    CancelledRecoveredBeforeExec,
    TimedOutRetryNextTick,
}

#[derive(Debug, Default)]
pub struct ReconcilerSummary {
    pub processed: usize,
    pub closed_auto: usize,
    pub cancelled_log_not_found: usize,
    pub marked_done_already_closed: usize,
    pub cancelled_recovered_before_exec: usize,
    pub timed_out: usize,
}

/// Run one reconciler pass (spec §4.6 "Per-invocation algorithm").
pub async fn run_once(pool: &PgPool) -> ReconcilerSummary {
    let now = chrono::Utc::now();
    let due = match AutoCheckoutPending::list_due(now, pool).await {
        Ok(rows) => rows,
        Err(error) => {
            tracing::error!(%error, "reconciler: failed to list due pending rows");
            return ReconcilerSummary::default();
        }
    };

    let mut summary = ReconcilerSummary::default();

    for row in due {
        summary.processed += 1;
        match tokio::time::timeout(ROW_TIMEOUT, process_row(&row, pool)).await {
            Ok(Ok(outcome)) => record(&mut summary, outcome),
            Ok(Err(error)) => {
                tracing::error!(pending_id = %row.id, %error, "reconciler: row failed, left for next tick");
            }
            Err(_) => {
                tracing::warn!(pending_id = %row.id, "reconciler: row timed out, left for next tick");
                summary.timed_out += 1;
            }
        }
    }

    summary
}

fn record(summary: &mut ReconcilerSummary, outcome: RowOutcome) {
    match outcome {
        RowOutcome::ClosedAuto => summary.closed_auto += 1,
        RowOutcome::CancelledLogNotFound => summary.cancelled_log_not_found += 1,
        RowOutcome::MarkedDoneAlreadyClosed => summary.marked_done_already_closed += 1,
        RowOutcome::CancelledRecoveredBeforeExec => summary.cancelled_recovered_before_exec += 1,
        RowOutcome::TimedOutRetryNextTick => summary.timed_out += 1,
    }
}

async fn process_row(row: &AutoCheckoutPending, pool: &PgPool) -> anyhow::Result<RowOutcome> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
        .execute(&mut *tx)
        .await?;

    let log = AttendanceLog::find_by_id_tx(row.attendance_log_id, &mut tx).await?;

    let Some(log) = log else {
        AutoCheckoutPending::cancel_tx(row.id, CancelReason::LogNotFound, &mut tx).await?;
        tx.commit().await?;
        return Ok(RowOutcome::CancelledLogNotFound);
    };

    if log.check_out_time.is_some() {
        AutoCheckoutPending::mark_done_tx(row.id, &mut tx).await?;
        tx.commit().await?;
        return Ok(RowOutcome::MarkedDoneAlreadyClosed);
    }

    let heartbeat = LocationHeartbeat::find_tx(row.employee_id, row.attendance_log_id, &mut tx).await?;

    if final_gate_passes(heartbeat.as_ref(), row.ends_at) {
        AutoCheckoutPending::cancel_tx(row.id, CancelReason::RecoveredBeforeExec, &mut tx).await?;
        tx.commit().await?;
        return Ok(RowOutcome::CancelledRecoveredBeforeExec);
    }

    let reason: CheckoutReason = row.reason.to_checkout_reason();
    AttendanceLog::close_auto(row.attendance_log_id, chrono::Utc::now(), reason, &mut tx).await?;
    AutoCheckoutPending::mark_done_tx(row.id, &mut tx).await?;

    tx.commit().await?;

    LocationHeartbeat::delete(row.employee_id, row.attendance_log_id, pool).await?;

    Ok(RowOutcome::ClosedAuto)
}

/// Final gate (spec §4.6, GLOSSARY "Final gate"): abort execution if the
/// latest heartbeat shows the employee back in branch with working GPS,
/// observed within 2 minutes of the deadline.
fn final_gate_passes(heartbeat: Option<&LocationHeartbeat>, ends_at: chrono::DateTime<chrono::Utc>) -> bool {
    match heartbeat {
        Some(hb) => hb.gps_ok && hb.in_branch && hb.last_seen_at >= ends_at - FRESHNESS_WINDOW,
        None => false,
    }
}

