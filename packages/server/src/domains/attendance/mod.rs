//! Admission Controller (C2) + Attendance Ledger (C3), spec §4.2-§4.3.

pub mod admission;
pub mod models;
pub mod repository;

pub use admission::{check_in, check_out, current, CheckInRequest, CheckOutRequest, CheckOutSource};
pub use models::{AttendanceLog, AttendanceStatus, CheckoutReason, CheckoutType};
pub use repository::{project_distinct_days, DistinctDay, NewSession};
