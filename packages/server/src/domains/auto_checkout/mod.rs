//! Auto-Checkout Pending lifecycle (C4, spec §4.4).

pub mod fsm;
pub mod models;
pub mod repository;
pub mod service;

pub use fsm::{AutoCheckoutFsm, FsmAction, FsmParams, FsmState, RawReason};
pub use models::{AutoCheckoutPending, CancelReason, PendingReason, PendingStatus};
pub use service::{cancel, propose, CancelRequest, ProposeRequest, PublicCancelReason};
