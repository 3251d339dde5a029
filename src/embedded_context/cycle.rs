//! State machine of one load-and-trigger cycle
//!
//! ```text
//! Loading  --Loaded-->          Settling
//! Settling --SettleElapsed-->   Done(Triggered)
//! any      --DeadlineReached--> Done(TimedOut)
//! any      --Fault-->           Done(Faulted)
//! Done     --*-->               Done            (no double resolution)
//! ```

use serde::{Deserialize, Serialize};

/// How one item's cycle ended
///
/// Every variant counts as "attempt finished" for the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleOutcome {
    /// The page loaded and the settle delay elapsed before the deadline
    Triggered,
    /// The deadline fired first
    TimedOut,
    /// The context could not be opened or lost its load signal
    Faulted(String),
}

/// Lifecycle signals observed by the manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleSignal {
    Loaded,
    SettleElapsed,
    DeadlineReached,
    Fault(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CyclePhase {
    Loading,
    Settling,
    Done(CycleOutcome),
}

impl CyclePhase {
    /// Apply one signal
    #[must_use]
    pub fn on(self, signal: CycleSignal) -> Self {
        match (self, signal) {
            (done @ Self::Done(_), _) => done,
            (_, CycleSignal::DeadlineReached) => Self::Done(CycleOutcome::TimedOut),
            (_, CycleSignal::Fault(detail)) => Self::Done(CycleOutcome::Faulted(detail)),
            (Self::Loading, CycleSignal::Loaded) => Self::Settling,
            (Self::Settling, CycleSignal::SettleElapsed) => Self::Done(CycleOutcome::Triggered),
            // Out-of-order signals leave the phase untouched
            (phase, _) => phase,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&CycleOutcome> {
        match self {
            Self::Done(outcome) => Some(outcome),
            _ => None,
        }
    }
}
