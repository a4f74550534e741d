//! Reconciler (C6, spec §4.6): scheduled materialization of pending
//! auto-checkouts, wired to a cron tick by `server::app`.

pub mod service;

pub use service::{run_once, ReconcilerSummary, RowOutcome};
