//! Attendance surface routes (spec §6).
pub mod attendance;
pub mod auth;
pub mod auto_checkout;
pub mod company;
pub mod health;
pub mod heartbeat;
pub mod reconciler;

pub use attendance::*;
pub use auth::*;
pub use auto_checkout::*;
pub use company::*;
pub use health::*;
pub use heartbeat::*;
pub use reconciler::*;
