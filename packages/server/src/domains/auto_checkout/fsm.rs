//! Auto-Checkout State Machine (C4, spec §4.4).
//!
//! The FSM itself runs on each connected client; the server only ever
//! observes it through the `PENDING` rows and heartbeats it writes (spec
//! §4.4 header). This module is the reference/testable model of that
//! client-side machine — shared by the mobile/web clients and by this
//! crate's test suite, since the server never executes it directly.

use chrono::{DateTime, Duration, Utc};

use super::models::{CancelReason, PendingReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsmState {
    Idle,
    Warning,
    Countdown,
    Done,
}

/// `raw_reason` (spec §4.4 "Observed signal"): `None` means a clean reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawReason {
    LocationDisabled,
    OutsideBranch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsmAction {
    CreatePending {
        reason: PendingReason,
        ends_at: DateTime<Utc>,
    },
    CancelPending {
        reason: CancelReason,
    },
}

/// Debounce parameters from `CompanySettings` (spec §4.4 "Debounce parameters").
#[derive(Debug, Clone, Copy)]
pub struct FsmParams {
    /// `N`: consecutive `OUTSIDE_BRANCH` readings needed to enter `COUNTDOWN`.
    pub n_outside_readings: u32,
    /// `M`: hard-coded consecutive good readings needed to clear back to `IDLE` (spec: 2).
    pub m_good_readings: u32,
    /// `T`: `after_seconds`, used to compute a fresh `ends_at` on entering `COUNTDOWN`.
    pub after: Duration,
}

impl Default for FsmParams {
    fn default() -> Self {
        Self {
            n_outside_readings: 3,
            m_good_readings: 2,
            after: Duration::seconds(900),
        }
    }
}

pub struct AutoCheckoutFsm {
    state: FsmState,
    params: FsmParams,
    outside_streak: u32,
    good_streak: u32,
    ends_at: Option<DateTime<Utc>>,
}

impl AutoCheckoutFsm {
    pub fn new(params: FsmParams) -> Self {
        Self {
            state: FsmState::Idle,
            params,
            outside_streak: 0,
            good_streak: 0,
            ends_at: None,
        }
    }

    pub fn state(&self) -> FsmState {
        self.state
    }

    /// The countdown anchor, once set at `COUNTDOWN` entry, is never
    /// recomputed (spec §4.4.1, §9, P3) — this is the sole getter; there is
    /// deliberately no setter besides `tick`'s own transition into `COUNTDOWN`.
    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.ends_at
    }

    /// Feed one observed reading (spec default tick cadence: 3s) and get
    /// back the action, if any, the client must perform against the server.
    pub fn tick(&mut self, raw_reason: Option<RawReason>, now: DateTime<Utc>) -> Option<FsmAction> {
        match raw_reason {
            Some(RawReason::LocationDisabled) => {
                self.good_streak = 0;
                self.outside_streak = 0;
                if matches!(self.state, FsmState::Idle | FsmState::Warning) {
                    self.enter_countdown(PendingReason::GpsBlocked, now)
                } else {
                    None
                }
            }
            Some(RawReason::OutsideBranch) => {
                self.good_streak = 0;
                self.outside_streak += 1;
                match self.state {
                    FsmState::Idle => {
                        if self.outside_streak >= self.params.n_outside_readings {
                            self.enter_countdown(PendingReason::OutsideBranch, now)
                        } else {
                            self.state = FsmState::Warning;
                            None
                        }
                    }
                    FsmState::Warning => {
                        if self.outside_streak >= self.params.n_outside_readings {
                            self.enter_countdown(PendingReason::OutsideBranch, now)
                        } else {
                            None
                        }
                    }
                    FsmState::Countdown | FsmState::Done => None,
                }
            }
            None => {
                self.outside_streak = 0;
                self.good_streak += 1;
                match self.state {
                    FsmState::Warning | FsmState::Countdown => {
                        if self.good_streak >= self.params.m_good_readings {
                            self.state = FsmState::Idle;
                            self.ends_at = None;
                            Some(FsmAction::CancelPending {
                                reason: CancelReason::Recovered,
                            })
                        } else {
                            None
                        }
                    }
                    FsmState::Idle | FsmState::Done => None,
                }
            }
        }
    }

    /// Wall-clock check for `COUNTDOWN -> DONE` (spec §4.4 transitions table):
    /// no client-side checkout side effect — the server reconciler
    /// materializes the close.
    pub fn check_deadline(&mut self, now: DateTime<Utc>) {
        if self.state == FsmState::Countdown {
            if let Some(ends_at) = self.ends_at {
                if now >= ends_at {
                    self.state = FsmState::Done;
                }
            }
        }
    }

    fn enter_countdown(&mut self, reason: PendingReason, now: DateTime<Utc>) -> Option<FsmAction> {
        self.state = FsmState::Countdown;
        let ends_at = now + self.params.after;
        self.ends_at = Some(ends_at);
        Some(FsmAction::CreatePending { reason, ends_at })
    }
}
