//! Typed ID definitions for all domain entities.
//!
//! This module defines type aliases for each domain entity, providing
//! compile-time type safety for ID usage throughout the application.
//!
//! # Example
//!
//! ```rust
//! use server_core::common::{CompanyId, EmployeeId};
//!
//! // These are incompatible types - compiler prevents mixing them up
//! let company_id: CompanyId = CompanyId::new();
//! let employee_id: EmployeeId = EmployeeId::new();
//!
//! // This would be a compile error:
//! // let wrong: EmployeeId = company_id;
//! ```

// Re-export the core Id type and version markers
pub use super::id::{Id, V4, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Company entities (tenant root).
pub struct Company;

/// Marker type for Employee entities.
pub struct Employee;

/// Marker type for Branch entities.
pub struct Branch;

/// Marker type for Shift entities.
pub struct Shift;

/// Marker type for AttendanceLog entities (attendance sessions).
pub struct AttendanceLog;

/// Marker type for AutoCheckoutPending entities.
pub struct AutoCheckoutPending;

/// Marker type for LocationHeartbeat entities.
pub struct LocationHeartbeat;

/// Marker type for CompanySettings entities.
pub struct CompanySettings;

/// Marker type for AdminUser entities.
pub struct AdminUser;

/// Marker type for ApprovedLeaveDay entities.
pub struct ApprovedLeaveDay;

/// Marker type for ApprovedDelayPermission entities.
pub struct ApprovedDelayPermission;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Company entities (tenant root).
pub type CompanyId = Id<Company>;

/// Typed ID for Employee entities.
pub type EmployeeId = Id<Employee>;

/// Typed ID for Branch entities.
pub type BranchId = Id<Branch>;

/// Typed ID for Shift entities.
pub type ShiftId = Id<Shift>;

/// Typed ID for AttendanceLog entities (attendance sessions).
pub type AttendanceLogId = Id<AttendanceLog>;

/// Typed ID for AutoCheckoutPending entities.
pub type AutoCheckoutPendingId = Id<AutoCheckoutPending>;

/// Typed ID for LocationHeartbeat entities.
pub type LocationHeartbeatId = Id<LocationHeartbeat>;

/// Typed ID for CompanySettings entities.
pub type CompanySettingsId = Id<CompanySettings>;

/// Typed ID for AdminUser entities.
pub type AdminUserId = Id<AdminUser>;

/// Typed ID for ApprovedLeaveDay entities.
pub type ApprovedLeaveDayId = Id<ApprovedLeaveDay>;

/// Typed ID for ApprovedDelayPermission entities.
pub type ApprovedDelayPermissionId = Id<ApprovedDelayPermission>;
