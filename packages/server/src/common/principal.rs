//! The ephemeral `Principal` produced by the Tenant Gatekeeper (spec §3, §4.1).
//!
//! A `Principal` is threaded through every call into the core; it is never
//! reconstructed from request-body fields, only from authoritative storage
//! behind the credential the request carried.

use serde::{Deserialize, Serialize};

use super::entity_ids::{CompanyId, EmployeeId};

/// Which kind of subject issued the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Admin,
    Employee,
}

/// `{subject_kind, subject_id, company_id}` from spec §3.
///
/// `subject_id` is the employee id when `subject_kind == Employee`; for an
/// admin principal it is the admin user's id (distinct id space, still
/// scoped to `company_id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub subject_kind: SubjectKind,
    pub subject_id: uuid::Uuid,
    pub company_id: CompanyId,
}

impl Principal {
    pub fn admin(subject_id: uuid::Uuid, company_id: CompanyId) -> Self {
        Self {
            subject_kind: SubjectKind::Admin,
            subject_id,
            company_id,
        }
    }

    pub fn employee(employee_id: EmployeeId, company_id: CompanyId) -> Self {
        Self {
            subject_kind: SubjectKind::Employee,
            subject_id: employee_id.into_uuid(),
            company_id,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.subject_kind, SubjectKind::Admin)
    }

    /// The principal's employee id, if it is an employee principal.
    pub fn employee_id(&self) -> Option<EmployeeId> {
        match self.subject_kind {
            SubjectKind::Employee => Some(EmployeeId::from_uuid(self.subject_id)),
            SubjectKind::Admin => None,
        }
    }

    /// Tenant isolation predicate (spec §4.1, §9): `row.company_id == principal.company_id`.
    pub fn scopes(&self, company_id: CompanyId) -> bool {
        self.company_id == company_id
    }
}
