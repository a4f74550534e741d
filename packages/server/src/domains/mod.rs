// Business domains of the Attendance Lifecycle Core (spec §2).
pub mod attendance;
pub mod auth;
pub mod auto_checkout;
pub mod company;
pub mod heartbeat;
pub mod payroll;
pub mod reconciler;
