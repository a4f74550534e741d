//! Attendance Lifecycle Core — server crate.
//!
//! The authoritative engine behind check-in/out admission, the
//! auto-checkout pending lifecycle, location heartbeats, tenant isolation,
//! and the reconciliation job that keeps client and server state eventually
//! consistent (spec §1-§2). Admin CRUD, report rendering, push/email
//! delivery, OTP issuance, and GPS->timezone resolution are external
//! collaborators this crate only consumes through narrow seams.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::Config;
