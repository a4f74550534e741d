//! Tenant root and directly-owned reference data (Company, Employee, Branch,
//! Shift, CompanySettings) plus the payroll read-model inputs (spec §3).

pub mod models;
pub mod repository;
pub mod settings_cache;

pub use models::{
    AdminUser, ApprovedDelayPermission, ApprovedLeaveDay, Branch, Company, CompanySettings,
    Employee, InsuranceTaxKind, Shift,
};
pub use settings_cache::SettingsCache;
