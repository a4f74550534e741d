//! Tenant Gatekeeper (C1, spec §4.1) against real storage: `authorize`
//! re-reads the subject's current state rather than trusting JWT claims.

mod common;

use test_context::test_context;

use common::{create_test_company, create_test_employee, TestHarness};
use server_core::domains::auth::{authorize, JwtService};

fn jwt_service() -> JwtService {
    JwtService::new("test-secret", "attendance-core".to_string())
}

#[test_context(TestHarness)]
#[tokio::test]
async fn authorize_resolves_a_valid_employee_token_to_a_principal(ctx: &TestHarness) {
    let company = create_test_company(&ctx.db_pool, 24.7136, 46.6753, 100.0).await.unwrap();
    let employee_id =
        create_test_employee(&ctx.db_pool, company.company_id, company.branch_id, company.shift_id)
            .await
            .unwrap();

    let jwt = jwt_service();
    let token = jwt
        .issue_employee_token(employee_id.into_uuid(), "device-1".to_string())
        .unwrap();

    let principal = authorize(&jwt, &token, &ctx.db_pool).await.expect("token should resolve");

    assert_eq!(principal.employee_id(), Some(employee_id));
    assert_eq!(principal.company_id, company.company_id);
}

/// An employee deactivated after token issuance is rejected on the very
/// next request — the claims are a credential, not an authority on current
/// state (spec §4.1).
#[test_context(TestHarness)]
#[tokio::test]
async fn authorize_rejects_a_token_for_a_deactivated_employee(ctx: &TestHarness) {
    let company = create_test_company(&ctx.db_pool, 24.7136, 46.6753, 100.0).await.unwrap();
    let employee_id =
        create_test_employee(&ctx.db_pool, company.company_id, company.branch_id, company.shift_id)
            .await
            .unwrap();

    let jwt = jwt_service();
    let token = jwt
        .issue_employee_token(employee_id.into_uuid(), "device-1".to_string())
        .unwrap();

    sqlx::query("UPDATE employees SET is_active = false WHERE id = $1")
        .bind(employee_id)
        .execute(&ctx.db_pool)
        .await
        .unwrap();

    let result = authorize(&jwt, &token, &ctx.db_pool).await;
    assert!(matches!(result, Err(server_core::common::error::AppError::EmployeeInactive)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn authorize_rejects_a_token_for_an_unknown_employee(ctx: &TestHarness) {
    let jwt = jwt_service();
    let token = jwt
        .issue_employee_token(uuid::Uuid::new_v4(), "device-1".to_string())
        .unwrap();

    let result = authorize(&jwt, &token, &ctx.db_pool).await;
    assert!(matches!(result, Err(server_core::common::error::AppError::Unauthenticated)));
}
