//! SQL persistence for the tenant root and its directly-owned entities.
//!
//! Grounded on `domains/member/models/member.rs` in the teacher: runtime
//! `sqlx::query_as::<_, Self>(..)` strings (no compile-time DB checks),
//! `anyhow::Result`, explicit `company_id` predicates on every read.

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::common::entity_ids::{BranchId, CompanyId, EmployeeId, ShiftId};

use super::models::{
    AdminUser, ApprovedDelayPermission, ApprovedLeaveDay, Branch, Company, CompanySettings,
    Employee, Shift,
};

impl Company {
    pub async fn find_by_id(id: CompanyId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}

impl Employee {
    /// Resolve an employee, scoped implicitly by its own id (the principal's
    /// `company_id` is checked by the caller against `employee.company_id` —
    /// spec §4.1: never trust a payload `company_id`).
    pub async fn find_by_id(id: EmployeeId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}

impl Branch {
    pub async fn find_by_id(id: BranchId, company_id: CompanyId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM branches WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}

impl Shift {
    pub async fn find_by_id(id: ShiftId, company_id: CompanyId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM shifts WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}

impl CompanySettings {
    /// One row per company (spec §3 invariant); auto-created on provisioning,
    /// so a missing row is treated as a data-integrity error by the caller.
    pub async fn find_by_company(company_id: CompanyId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM company_settings WHERE company_id = $1")
            .bind(company_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}

impl AdminUser {
    pub async fn find_by_id(id: crate::common::entity_ids::AdminUserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM admin_users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}

impl ApprovedLeaveDay {
    /// Approved leave days for `employee_id` within `[from, to]` inclusive.
    pub async fn find_in_range(
        employee_id: EmployeeId,
        company_id: CompanyId,
        from: NaiveDate,
        to: NaiveDate,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM approved_leave_days
             WHERE employee_id = $1 AND company_id = $2 AND day BETWEEN $3 AND $4",
        )
        .bind(employee_id)
        .bind(company_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

impl ApprovedDelayPermission {
    /// Approved delay-permission minutes for `employee_id` within `[from, to]`.
    pub async fn find_in_range(
        employee_id: EmployeeId,
        company_id: CompanyId,
        from: NaiveDate,
        to: NaiveDate,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM approved_delay_permissions
             WHERE employee_id = $1 AND company_id = $2 AND day BETWEEN $3 AND $4",
        )
        .bind(employee_id)
        .bind(company_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
