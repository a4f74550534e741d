//! Persistence models for the tenant root and its directly-owned entities
//! (spec §3: Company, Employee, Branch, Shift, CompanySettings, plus the
//! read-only leave/delay inputs payroll projection needs — §11 SPEC_FULL).

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::entity_ids::{
    AdminUserId, ApprovedDelayPermissionId, ApprovedLeaveDayId, BranchId, CompanyId,
    CompanySettingsId, EmployeeId, ShiftId,
};

/// Tenant root. Immutable identity (spec §3 "Company").
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub company_id: CompanyId,
    pub branch_id: BranchId,
    pub shift_id: Option<ShiftId>,
    pub is_active: bool,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub company_id: CompanyId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub geofence_radius_m: f64,
    pub is_active: bool,
}

/// Wall-clock shift window in the company timezone (spec §3 "Shift").
///
/// `end_time < start_time` denotes an overnight shift; this struct stores
/// the raw wall-clock times and leaves overnight interpretation to callers.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub company_id: CompanyId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub grace_minutes: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InsuranceTaxKind {
    Percentage,
    Fixed,
}

/// Per-company tunables consumed by the core (spec §3 "CompanySettings").
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct CompanySettings {
    pub id: CompanySettingsId,
    pub company_id: CompanyId,

    // Auto-checkout
    pub auto_checkout_enabled: bool,
    pub auto_checkout_after_seconds: i32,
    pub verify_outside_with_n_readings: i32,

    // Payroll
    pub workdays_per_month: i32,
    pub currency: String,
    pub insurance_type: InsuranceTaxKind,
    pub insurance_value: rust_decimal::Decimal,
    pub tax_type: InsuranceTaxKind,
    pub tax_value: rust_decimal::Decimal,
    pub overtime_multiplier: rust_decimal::Decimal,
    pub shift_hours_per_day: rust_decimal::Decimal,
    pub grace_minutes: i32,

    // Attendance calculation
    /// ISO weekday numbers (1 = Monday .. 7 = Sunday) that are the weekly off days.
    pub weekly_off_days: Vec<i32>,
}

impl CompanySettings {
    /// `after_seconds` as a `chrono::Duration` for FSM/reconciler arithmetic.
    pub fn auto_checkout_after(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.auto_checkout_after_seconds as i64)
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub company_id: CompanyId,
    pub full_name: String,
    pub is_active: bool,
}

/// Read-only input to payroll (spec §4.7); admin CRUD that populates this
/// table is an out-of-scope collaborator (spec §1) — the core only reads it.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ApprovedLeaveDay {
    pub id: ApprovedLeaveDayId,
    pub company_id: CompanyId,
    pub employee_id: EmployeeId,
    pub day: chrono::NaiveDate,
}

/// Approved delay (excuse) permission for lateness on a specific day
/// (spec §4.7, S7). Read-only input; populated by an out-of-scope collaborator.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ApprovedDelayPermission {
    pub id: ApprovedDelayPermissionId,
    pub company_id: CompanyId,
    pub employee_id: EmployeeId,
    pub day: chrono::NaiveDate,
    pub minutes: i32,
}
