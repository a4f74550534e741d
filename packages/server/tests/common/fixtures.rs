//! Test fixtures for creating tenant/employee/branch rows.

use anyhow::Result;
use chrono::NaiveTime;
use sqlx::PgPool;

use server_core::common::entity_ids::{BranchId, CompanyId, EmployeeId, ShiftId};

pub struct TestCompany {
    pub company_id: CompanyId,
    pub branch_id: BranchId,
    pub shift_id: ShiftId,
}

/// Create a company, one branch at `(lat, lng)` with `radius_m`, and one
/// shift `09:00-17:00` with a 10 minute grace window, plus a matching
/// `company_settings` row.
pub async fn create_test_company(pool: &PgPool, lat: f64, lng: f64, radius_m: f64) -> Result<TestCompany> {
    let company_id = CompanyId::new();
    sqlx::query("INSERT INTO companies (id, name, timezone, created_at) VALUES ($1, $2, $3, now())")
        .bind(company_id)
        .bind("Test Co")
        .bind("UTC")
        .execute(pool)
        .await?;

    let branch_id = BranchId::new();
    sqlx::query(
        "INSERT INTO branches (id, company_id, name, latitude, longitude, geofence_radius_m, is_active)
         VALUES ($1, $2, $3, $4, $5, $6, true)",
    )
    .bind(branch_id)
    .bind(company_id)
    .bind("Main Branch")
    .bind(lat)
    .bind(lng)
    .bind(radius_m)
    .execute(pool)
    .await?;

    let shift_id = ShiftId::new();
    sqlx::query(
        "INSERT INTO shifts (id, company_id, start_time, end_time, grace_minutes) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(shift_id)
    .bind(company_id)
    .bind(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
    .bind(NaiveTime::from_hms_opt(17, 0, 0).unwrap())
    .bind(10)
    .execute(pool)
    .await?;

    sqlx::query(
        "INSERT INTO company_settings (
            id, company_id, auto_checkout_enabled, auto_checkout_after_seconds,
            verify_outside_with_n_readings, workdays_per_month, currency,
            insurance_type, insurance_value, tax_type, tax_value,
            overtime_multiplier, shift_hours_per_day, grace_minutes, weekly_off_days
         ) VALUES ($1, $2, true, 900, 3, 26, 'SAR', 'percentage', 0, 'percentage', 0, 1.5, 8, 10, $3)",
    )
    .bind(uuid::Uuid::new_v4())
    .bind(company_id)
    .bind(vec![5_i32, 6])
    .execute(pool)
    .await?;

    Ok(TestCompany { company_id, branch_id, shift_id })
}

pub async fn create_test_employee(
    pool: &PgPool,
    company_id: CompanyId,
    branch_id: BranchId,
    shift_id: ShiftId,
) -> Result<EmployeeId> {
    let employee_id = EmployeeId::new();
    sqlx::query(
        "INSERT INTO employees (id, company_id, branch_id, shift_id, is_active, full_name, created_at)
         VALUES ($1, $2, $3, $4, true, $5, now())",
    )
    .bind(employee_id)
    .bind(company_id)
    .bind(branch_id)
    .bind(shift_id)
    .bind("Test Employee")
    .execute(pool)
    .await?;
    Ok(employee_id)
}
