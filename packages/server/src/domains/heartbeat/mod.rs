//! Heartbeat Sink (C5, spec §4.5).

pub mod models;
pub mod repository;
pub mod service;

pub use models::{LocationHeartbeat, FRESHNESS_WINDOW};
pub use service::{upsert_heartbeat, HeartbeatRequest};
