//! Tenant Gatekeeper (C1, spec §4.1).
//!
//! `authorize` resolves verified JWT claims to a `Principal` by re-reading
//! the subject's current `company_id` from storage — the token's claims are
//! a credential, never an authority on tenant membership, so a principal is
//! always as fresh as the database row it was derived from.

use sqlx::PgPool;

use crate::common::error::AppError;
use crate::common::principal::{Principal, SubjectKind};

use super::jwt::{Claims, JwtService};
use crate::domains::company::{AdminUser, Employee};

/// Verify `token` and resolve it to a `Principal` against authoritative storage.
///
/// Errors: `Unauthenticated` (bad/expired token, or subject no longer
/// exists / is inactive).
pub async fn authorize(jwt: &JwtService, token: &str, pool: &PgPool) -> Result<Principal, AppError> {
    let claims: Claims = jwt
        .verify_token(token)
        .map_err(|_| AppError::Unauthenticated)?;

    match claims.subject_kind {
        SubjectKind::Employee => {
            let employee_id = crate::common::entity_ids::EmployeeId::from_uuid(claims.subject_id);
            let employee = Employee::find_by_id(employee_id, pool)
                .await
                .map_err(AppError::Internal)?
                .ok_or(AppError::Unauthenticated)?;

            if !employee.is_active {
                return Err(AppError::EmployeeInactive);
            }

            Ok(Principal::employee(employee.id, employee.company_id))
        }
        SubjectKind::Admin => {
            let admin_id = crate::common::entity_ids::AdminUserId::from_uuid(claims.subject_id);
            let admin = AdminUser::find_by_id(admin_id, pool)
                .await
                .map_err(AppError::Internal)?
                .ok_or(AppError::Unauthenticated)?;

            if !admin.is_active {
                return Err(AppError::Unauthenticated);
            }

            Ok(Principal::admin(admin.id.into_uuid(), admin.company_id))
        }
    }
}

/// Defense-in-depth check (spec §4.1, §9): a payload-carried `company_id`
/// must agree with the principal's. Never used as the source of authority.
pub fn check_tenant_match(
    principal: &Principal,
    payload_company_id: crate::common::entity_ids::CompanyId,
) -> Result<(), AppError> {
    if principal.scopes(payload_company_id) {
        Ok(())
    } else {
        Err(AppError::TenantMismatch)
    }
}

/// Capability check: only an admin principal may perform administrative
/// mutations; an employee principal may only act on rows where
/// `row.employee_id == principal.subject_id` (spec §4.1).
pub fn require_admin(principal: &Principal) -> Result<(), AppError> {
    if principal.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Require that `principal` is the employee owning `employee_id` (spec §4.1's
/// "employee only for their own ... writes" rule).
pub fn require_self(
    principal: &Principal,
    employee_id: crate::common::entity_ids::EmployeeId,
) -> Result<(), AppError> {
    if principal.employee_id() == Some(employee_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::entity_ids::{CompanyId, EmployeeId};

    #[test]
    fn tenant_mismatch_rejects_foreign_company() {
        let company_a = CompanyId::new();
        let company_b = CompanyId::new();
        let principal = Principal::employee(EmployeeId::new(), company_a);
        assert!(check_tenant_match(&principal, company_a).is_ok());
        assert!(matches!(
            check_tenant_match(&principal, company_b),
            Err(AppError::TenantMismatch)
        ));
    }

    #[test]
    fn require_admin_rejects_employee_principal() {
        let principal = Principal::employee(EmployeeId::new(), CompanyId::new());
        assert!(matches!(require_admin(&principal), Err(AppError::Forbidden)));
    }

    #[test]
    fn require_self_rejects_other_employee() {
        let company = CompanyId::new();
        let me = EmployeeId::new();
        let other = EmployeeId::new();
        let principal = Principal::employee(me, company);
        assert!(require_self(&principal, me).is_ok());
        assert!(matches!(require_self(&principal, other), Err(AppError::Forbidden)));
    }
}
