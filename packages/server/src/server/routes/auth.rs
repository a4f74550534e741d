//! `POST /auth/dev-login` (SPEC_FULL §10.5): the minimum principal-issuance
//! scaffolding this crate owns so the Admission Controller always has a
//! `Principal` to work with in tests and local development.
//!
//! OTP issuance and device activation themselves are out-of-scope external
//! collaborators (spec §1) — this endpoint does not reimplement them, it
//! only mints a session token for an id the caller already knows, gated
//! behind `Config::dev_login_enabled` so it never ships reachable in a real
//! deployment.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::error::{AppError, AppResult};
use crate::common::principal::SubjectKind;
use crate::server::app::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct DevLoginRequest {
    pub subject_kind: SubjectKind,
    pub subject_id: Uuid,
    /// Required for `subject_kind = employee` (spec §4.1 credential (b)); ignored for admin.
    pub device_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DevLoginResponse {
    pub session_token: String,
}

pub async fn dev_login_handler(
    State(state): State<AppState>,
    Json(req): Json<DevLoginRequest>,
) -> AppResult<Json<DevLoginResponse>> {
    if !state.dev_login_enabled {
        return Err(AppError::NotFound("dev-login".to_string()));
    }

    let token = match req.subject_kind {
        SubjectKind::Employee => {
            let device_id = req
                .device_id
                .ok_or_else(|| AppError::Validation("device_id is required for employee login".to_string()))?;
            state
                .jwt_service
                .issue_employee_token(req.subject_id, device_id)
                .map_err(AppError::Internal)?
        }
        SubjectKind::Admin => state
            .jwt_service
            .issue_admin_token(req.subject_id)
            .map_err(AppError::Internal)?,
    };

    Ok(Json(DevLoginResponse { session_token: token }))
}
