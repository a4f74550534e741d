//! Payroll Projector (C7, spec §4.7) input/output shapes.
//!
//! All money fields are `rust_decimal::Decimal` — the teacher's stack pulls
//! in `rust_decimal` specifically for this module (see root `Cargo.toml`),
//! and floating point has no place in a pay figure a client disputes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::entity_ids::{CompanyId, EmployeeId};

/// Everything the projection needs beyond what storage already knows about
/// the employee (spec §4.7 "Inputs"). `base_monthly_salary`/`monthly_allowances`
/// and bonus/penalty/overtime figures are owned by the (out-of-scope)
/// payroll admin surface — this module only consumes them.
#[derive(Debug, Clone)]
pub struct PayrollInput {
    pub employee_id: EmployeeId,
    pub company_id: CompanyId,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub base_monthly_salary: Decimal,
    pub monthly_allowances: Decimal,
    pub overtime_hours: Decimal,
    pub bonuses: Decimal,
    pub penalties: Decimal,
}

/// Spec §4.7 "Derived quantities" plus the final `net` figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollResult {
    pub working_days_in_month: i32,
    pub range_days: i64,
    pub working_days_in_range: i64,
    pub present_days_in_range: i64,
    pub absence_days_in_range: i64,
    pub approved_leave_days_in_range: i64,

    pub daily_rate: Decimal,
    pub base_pay_for_range: Decimal,
    pub allowances_for_range: Decimal,
    pub absence_deduction: Decimal,
    pub lateness_minutes_deducted: i64,
    pub lateness_deduction: Decimal,
    pub overtime_pay: Decimal,
    pub insurance_for_range: Decimal,
    pub tax_for_range: Decimal,

    pub bonuses: Decimal,
    pub penalties: Decimal,

    pub net: Decimal,
}
