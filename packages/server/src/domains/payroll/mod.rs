//! Payroll Projector (C7, spec §4.7): attendance range -> pay figures.

pub mod models;
pub mod service;

pub use models::{PayrollInput, PayrollResult};
pub use service::{compute, project};
