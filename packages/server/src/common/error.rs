//! The application-wide error type and its HTTP envelope.
//!
//! Every error surfaced to a caller is `{code, message, details?}` (see
//! spec §6/§7). `code` is stable and meant to be matched on by clients;
//! `message` is diagnostic only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Stable error taxonomy from spec §7.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Tenant mismatch: payload company does not match principal")]
    TenantMismatch,

    #[error("Forbidden: missing required capability")]
    Forbidden,

    #[error("Employee is inactive")]
    EmployeeInactive,

    #[error("Branch is unavailable")]
    BranchUnavailable,

    #[error("Outside geofence ({distance_m:.1}m from branch)")]
    OutOfGeofence { distance_m: f64 },

    #[error("Already checked in")]
    AlreadyCheckedIn { attendance_log_id: Uuid },

    #[error("Not checked in")]
    NotCheckedIn,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// The stable machine-readable code clients match on.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthenticated => "UNAUTHENTICATED",
            AppError::TenantMismatch => "TENANT_MISMATCH",
            AppError::Forbidden => "FORBIDDEN",
            AppError::EmployeeInactive => "EMPLOYEE_INACTIVE",
            AppError::BranchUnavailable => "BRANCH_UNAVAILABLE",
            AppError::OutOfGeofence { .. } => "OUT_OF_GEOFENCE",
            AppError::AlreadyCheckedIn { .. } => "ALREADY_CHECKED_IN",
            AppError::NotCheckedIn => "NOT_CHECKED_IN",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Database(_) => "INTERNAL",
            AppError::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::TenantMismatch | AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::EmployeeInactive
            | AppError::BranchUnavailable
            | AppError::OutOfGeofence { .. }
            | AppError::NotCheckedIn
            | AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::AlreadyCheckedIn { .. } => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            AppError::OutOfGeofence { distance_m } => Some(serde_json::json!({
                "distance_m": distance_m,
            })),
            AppError::AlreadyCheckedIn { attendance_log_id } => Some(serde_json::json!({
                "attendance_log_id": attendance_log_id,
            })),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct ErrorEnvelope {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<Uuid>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let is_internal = matches!(self, AppError::Database(_) | AppError::Internal(_));
        let trace_id = if is_internal {
            let id = Uuid::new_v4();
            tracing::error!(error = %self, trace_id = %id, "internal error");
            Some(id)
        } else {
            None
        };

        let envelope = ErrorEnvelope {
            code: self.code(),
            message: if is_internal {
                "An internal error occurred".to_string()
            } else {
                self.to_string()
            },
            details: self.details(),
            trace_id,
        };

        (status, Json(envelope)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
