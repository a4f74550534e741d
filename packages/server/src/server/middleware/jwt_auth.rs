//! Resolves the bearer token on every attendance-surface request into a
//! `Principal` (spec §4.1). Grounded on the teacher's `jwt_auth_middleware`
//! header-extraction shape, but implemented as an axum extractor rather
//! than a blanket middleware: the gatekeeper's resolution is a DB read, and
//! every handler behind this surface needs the resulting `Principal`
//! unconditionally, so there is no "public" path to fall back to.

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use crate::common::error::AppError;
use crate::common::principal::Principal;
use crate::server::app::AppState;

/// Extractor wrapper around [`Principal`] (spec §3). Use as a handler
/// argument: `async fn handler(AuthedPrincipal(principal): AuthedPrincipal, ...)`.
#[derive(Debug, Clone, Copy)]
pub struct AuthedPrincipal(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for AuthedPrincipal
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let token = extract_bearer(parts).ok_or(AppError::Unauthenticated)?;
        let principal = crate::domains::auth::authorize(&state.jwt_service, token, &state.db_pool).await?;

        Ok(AuthedPrincipal(principal))
    }
}

fn extract_bearer(parts: &Parts) -> Option<&str> {
    let header = parts.headers.get(axum::http::header::AUTHORIZATION)?;
    let value = header.to_str().ok()?;
    Some(value.strip_prefix("Bearer ").unwrap_or(value))
}

/// `POST /internal/reconciler/run`'s system credential (spec §6), a flat
/// shared-secret comparison rather than a JWT — there is no subject to
/// resolve a `Principal` for, only a yes/no "is this the scheduler caller".
#[derive(Debug, Clone, Copy)]
pub struct SystemCredential;

#[async_trait]
impl<S> FromRequestParts<S> for SystemCredential
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let token = extract_bearer(parts).ok_or(AppError::Unauthenticated)?;

        if token == state.system_reconciler_token.as_str() {
            Ok(SystemCredential)
        } else {
            Err(AppError::Unauthenticated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_bearer_strips_prefix() {
        let request = axum::http::Request::builder()
            .header("authorization", "Bearer abc.def.ghi")
            .body(())
            .unwrap();
        let (parts, _) = request.into_parts();
        assert_eq!(extract_bearer(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn extract_bearer_none_without_header() {
        let request = axum::http::Request::builder().body(()).unwrap();
        let (parts, _) = request.into_parts();
        assert_eq!(extract_bearer(&parts), None);
    }
}
