//! Tenant Gatekeeper (C1, spec §4.1): session trust surface + authorization.

pub mod gatekeeper;
pub mod jwt;

pub use gatekeeper::{authorize, check_tenant_match, require_admin, require_self};
pub use jwt::{Claims, JwtService};
