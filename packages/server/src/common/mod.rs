// Common types and utilities shared across the application

pub mod error;
pub mod entity_ids;
pub mod geo;
pub mod id;
pub mod principal;
pub mod time;

pub use entity_ids::*;
pub use error::{AppError, AppResult};
pub use id::{Id, V4, V7};
pub use principal::{Principal, SubjectKind};
