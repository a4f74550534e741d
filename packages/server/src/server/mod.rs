//! HTTP server setup (Axum) for the attendance surface (spec §6).
pub mod app;
pub mod middleware;
pub mod routes;

pub use app::*;
