//! JWT issuance/verification for the session trust surface the Admission
//! Controller needs a `Principal` from (spec §4.1, SPEC_FULL §10.5).
//!
//! OTP issuance and device activation themselves stay out of scope (spec
//! §1); this is the minimum scaffolding standing in for that external
//! collaborator, grounded on the teacher's `domains/auth/jwt.rs`.

use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::principal::SubjectKind;

/// Claims carried by both employee-session and admin-bearer tokens.
///
/// `device_id` is only meaningful for employee tokens (spec §4.1 credential
/// (b): "employee session token bound to `(employee_id, device_id)`").
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub subject_kind: SubjectKind,
    pub subject_id: Uuid,
    pub device_id: Option<String>,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub jti: String,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
        }
    }

    /// Issue an employee session token, bound to a device (24h expiry).
    pub fn issue_employee_token(&self, employee_id: Uuid, device_id: String) -> Result<String> {
        self.issue(employee_id, SubjectKind::Employee, Some(device_id))
    }

    /// Issue an admin bearer token (24h expiry).
    pub fn issue_admin_token(&self, admin_user_id: Uuid) -> Result<String> {
        self.issue(admin_user_id, SubjectKind::Admin, None)
    }

    fn issue(&self, subject_id: Uuid, subject_kind: SubjectKind, device_id: Option<String>) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::hours(24);

        let claims = Claims {
            sub: subject_id.to_string(),
            subject_kind,
            subject_id,
            device_id,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_token_roundtrips_with_device_id() {
        let service = JwtService::new("test_secret_key", "attendance-core".to_string());
        let employee_id = Uuid::new_v4();

        let token = service
            .issue_employee_token(employee_id, "device-123".to_string())
            .unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.subject_id, employee_id);
        assert_eq!(claims.subject_kind, SubjectKind::Employee);
        assert_eq!(claims.device_id.as_deref(), Some("device-123"));
    }

    #[test]
    fn admin_token_has_no_device_id() {
        let service = JwtService::new("test_secret_key", "attendance-core".to_string());
        let admin_id = Uuid::new_v4();

        let token = service.issue_admin_token(admin_id).unwrap();
        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.subject_kind, SubjectKind::Admin);
        assert!(claims.device_id.is_none());
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let a = JwtService::new("secret-a", "attendance-core".to_string());
        let b = JwtService::new("secret-b", "attendance-core".to_string());

        let token = a.issue_admin_token(Uuid::new_v4()).unwrap();
        assert!(b.verify_token(&token).is_err());
    }
}
