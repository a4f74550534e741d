//! End-to-end attendance lifecycle tests against a real Postgres container.

mod common;

use chrono::Utc;
use test_context::test_context;

use common::{create_test_company, create_test_employee, TestHarness};
use server_core::common::principal::Principal;
use server_core::domains::attendance::{check_in, check_out, current, CheckInRequest, CheckOutRequest, CheckOutSource};
use server_core::domains::auto_checkout::{propose, PendingReason};

fn check_in_request(lat: f64, lng: f64) -> CheckInRequest {
    CheckInRequest {
        latitude: lat,
        longitude: lng,
        accuracy_m: 5.0,
        device_time: Utc::now(),
        device_id: "device-1".to_string(),
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn check_in_inside_geofence_succeeds(ctx: &TestHarness) {
    let company = create_test_company(&ctx.db_pool, 24.7136, 46.6753, 100.0).await.unwrap();
    let employee_id =
        create_test_employee(&ctx.db_pool, company.company_id, company.branch_id, company.shift_id)
            .await
            .unwrap();
    let principal = Principal::employee(employee_id, company.company_id);

    let session = check_in(&principal, check_in_request(24.7136, 46.6753), &ctx.db_pool)
        .await
        .expect("check-in should succeed inside the geofence");

    assert_eq!(session.employee_id, employee_id);
    assert!(session.is_open());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn check_in_outside_geofence_is_rejected(ctx: &TestHarness) {
    let company = create_test_company(&ctx.db_pool, 24.7136, 46.6753, 100.0).await.unwrap();
    let employee_id =
        create_test_employee(&ctx.db_pool, company.company_id, company.branch_id, company.shift_id)
            .await
            .unwrap();
    let principal = Principal::employee(employee_id, company.company_id);

    // ~11km away, well outside a 100m geofence.
    let result = check_in(&principal, check_in_request(24.8136, 46.7753), &ctx.db_pool).await;

    assert!(matches!(
        result,
        Err(server_core::common::error::AppError::OutOfGeofence { .. })
    ));
}

/// P1: a second check-in while a session is already open is rejected, not
/// silently accepted as a second concurrent session.
#[test_context(TestHarness)]
#[tokio::test]
async fn duplicate_check_in_is_rejected(ctx: &TestHarness) {
    let company = create_test_company(&ctx.db_pool, 24.7136, 46.6753, 100.0).await.unwrap();
    let employee_id =
        create_test_employee(&ctx.db_pool, company.company_id, company.branch_id, company.shift_id)
            .await
            .unwrap();
    let principal = Principal::employee(employee_id, company.company_id);

    check_in(&principal, check_in_request(24.7136, 46.6753), &ctx.db_pool)
        .await
        .expect("first check-in succeeds");

    let second = check_in(&principal, check_in_request(24.7136, 46.6753), &ctx.db_pool).await;

    assert!(matches!(
        second,
        Err(server_core::common::error::AppError::AlreadyCheckedIn { .. })
    ));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn check_out_closes_the_open_session_and_cancels_pending_auto_checkout(ctx: &TestHarness) {
    let company = create_test_company(&ctx.db_pool, 24.7136, 46.6753, 100.0).await.unwrap();
    let employee_id =
        create_test_employee(&ctx.db_pool, company.company_id, company.branch_id, company.shift_id)
            .await
            .unwrap();
    let principal = Principal::employee(employee_id, company.company_id);

    let session = check_in(&principal, check_in_request(24.7136, 46.6753), &ctx.db_pool)
        .await
        .unwrap();

    propose(
        &principal,
        session.id,
        PendingReason::OutsideBranch,
        Utc::now() + chrono::Duration::seconds(900),
        &ctx.db_pool,
    )
    .await
    .expect("propose should succeed against the caller's own open session");

    let closed = check_out(
        &principal,
        CheckOutRequest { latitude: None, longitude: None, accuracy_m: None, source: CheckOutSource::Manual },
        &ctx.db_pool,
    )
    .await
    .expect("check-out should close the open session");

    assert_eq!(closed.id, session.id);
    assert!(!closed.is_open());
    assert!(current(&principal, &ctx.db_pool).await.unwrap().is_none());
}

/// Spec §4.2 check-out step 1: retrying check-out after success must not
/// error — it should return the already-closed session.
#[test_context(TestHarness)]
#[tokio::test]
async fn repeated_check_out_is_idempotent(ctx: &TestHarness) {
    let company = create_test_company(&ctx.db_pool, 24.7136, 46.6753, 100.0).await.unwrap();
    let employee_id =
        create_test_employee(&ctx.db_pool, company.company_id, company.branch_id, company.shift_id)
            .await
            .unwrap();
    let principal = Principal::employee(employee_id, company.company_id);

    check_in(&principal, check_in_request(24.7136, 46.6753), &ctx.db_pool).await.unwrap();
    let first = check_out(
        &principal,
        CheckOutRequest { latitude: None, longitude: None, accuracy_m: None, source: CheckOutSource::Manual },
        &ctx.db_pool,
    )
    .await
    .unwrap();

    let second = check_out(
        &principal,
        CheckOutRequest { latitude: None, longitude: None, accuracy_m: None, source: CheckOutSource::Manual },
        &ctx.db_pool,
    )
    .await
    .expect("a retried check-out replays the closed session instead of erroring");

    assert_eq!(first.id, second.id);
}
