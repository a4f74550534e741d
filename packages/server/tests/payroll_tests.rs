//! Payroll projection against real attendance history (spec §4.7).

mod common;

use chrono::{NaiveDate, Utc};
use test_context::test_context;

use common::{create_test_company, create_test_employee, TestHarness};
use server_core::common::principal::Principal;
use server_core::domains::attendance::{check_in, CheckInRequest};
use server_core::domains::payroll::{project, PayrollInput};

fn check_in_request(lat: f64, lng: f64, device_time: chrono::DateTime<Utc>) -> CheckInRequest {
    CheckInRequest { latitude: lat, longitude: lng, accuracy_m: 5.0, device_time, device_id: "device-1".to_string() }
}

/// A single attendance session in range counts as one present day and
/// reduces the absence deduction accordingly, read through real storage.
#[test_context(TestHarness)]
#[tokio::test]
async fn project_counts_a_real_session_as_one_present_day(ctx: &TestHarness) {
    let company = create_test_company(&ctx.db_pool, 24.7136, 46.6753, 100.0).await.unwrap();
    let employee_id =
        create_test_employee(&ctx.db_pool, company.company_id, company.branch_id, company.shift_id)
            .await
            .unwrap();
    let principal = Principal::employee(employee_id, company.company_id);

    let now = Utc::now();
    check_in(&principal, check_in_request(24.7136, 46.6753, now), &ctx.db_pool).await.unwrap();

    let today = now.date_naive();
    let input = PayrollInput {
        employee_id,
        company_id: company.company_id,
        from: today - chrono::Duration::days(9),
        to: today,
        base_monthly_salary: rust_decimal::Decimal::from(6000),
        monthly_allowances: rust_decimal::Decimal::ZERO,
        overtime_hours: rust_decimal::Decimal::ZERO,
        bonuses: rust_decimal::Decimal::ZERO,
        penalties: rust_decimal::Decimal::ZERO,
    };

    let result = project(input, &ctx.db_pool).await.expect("projection should succeed");

    assert_eq!(result.present_days_in_range, 1);
    assert_eq!(result.range_days, 10);
}

/// A range that precedes itself is rejected before touching storage.
#[test_context(TestHarness)]
#[tokio::test]
async fn project_rejects_inverted_range(ctx: &TestHarness) {
    let company = create_test_company(&ctx.db_pool, 24.7136, 46.6753, 100.0).await.unwrap();
    let employee_id =
        create_test_employee(&ctx.db_pool, company.company_id, company.branch_id, company.shift_id)
            .await
            .unwrap();

    let input = PayrollInput {
        employee_id,
        company_id: company.company_id,
        from: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
        to: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        base_monthly_salary: rust_decimal::Decimal::from(6000),
        monthly_allowances: rust_decimal::Decimal::ZERO,
        overtime_hours: rust_decimal::Decimal::ZERO,
        bonuses: rust_decimal::Decimal::ZERO,
        penalties: rust_decimal::Decimal::ZERO,
    };

    let result = project(input, &ctx.db_pool).await;
    assert!(matches!(result, Err(server_core::common::error::AppError::Validation(_))));
}
