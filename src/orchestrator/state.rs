//! Run state: the {Idle, Running} lock, the public snapshot and the per-run
//! context passed through the orchestrator's steps.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::Instant;

use crate::embedded_context::CycleOutcome;
use crate::item_extractor::ItemDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    #[default]
    Idle,
    Running,
}

/// Point-in-time view of the orchestrator
///
/// `completed` and `total` keep the last run's values after it ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestrationState {
    pub phase: RunPhase,
    pub completed: usize,
    pub total: usize,
    pub active_item: Option<ItemDescriptor>,
}

impl OrchestrationState {
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    fn begin(&mut self, total: usize) {
        debug_assert_eq!(self.phase, RunPhase::Idle);
        *self = Self {
            phase: RunPhase::Running,
            completed: 0,
            total,
            active_item: None,
        };
    }

    pub(crate) fn set_active(&mut self, item: Option<ItemDescriptor>) {
        self.active_item = item;
    }

    pub(crate) fn record_completion(&mut self, completed: usize) {
        debug_assert!(completed >= self.completed && completed <= self.total);
        self.completed = completed;
    }

    fn finish(&mut self) {
        self.phase = RunPhase::Idle;
        self.active_item = None;
    }
}

/// Holds the run lock; releasing happens on drop, on every exit path
pub(crate) struct RunGuard<'a> {
    running: &'a AtomicBool,
    state: &'a Mutex<OrchestrationState>,
}

impl<'a> RunGuard<'a> {
    /// Acquire without suspending; `None` when a run is already active
    pub(crate) fn acquire(
        running: &'a AtomicBool,
        state: &'a Mutex<OrchestrationState>,
        total: usize,
    ) -> Option<Self> {
        running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        state.lock().begin(total);
        Some(Self { running, state })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.state.lock().finish();
        self.running.store(false, Ordering::Release);
    }
}

/// Counters of one run
#[derive(Debug, Clone)]
pub(crate) struct RunContext {
    pub(crate) total: usize,
    pub(crate) completed: usize,
    triggered: usize,
    timed_out: usize,
    faulted: usize,
    started: Instant,
    started_at: DateTime<Utc>,
}

impl RunContext {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            triggered: 0,
            timed_out: 0,
            faulted: 0,
            started: Instant::now(),
            started_at: Utc::now(),
        }
    }

    pub(crate) fn record(&mut self, outcome: &CycleOutcome) {
        self.completed += 1;
        match outcome {
            CycleOutcome::Triggered => self.triggered += 1,
            CycleOutcome::TimedOut => self.timed_out += 1,
            CycleOutcome::Faulted(_) => self.faulted += 1,
        }
    }

    pub(crate) fn summary(&self) -> RunSummary {
        RunSummary {
            total: self.total,
            completed: self.completed,
            triggered: self.triggered,
            timed_out: self.timed_out,
            faulted: self.faulted,
            elapsed: self.started.elapsed(),
            started_at: self.started_at,
            finished_at: Utc::now(),
        }
    }
}

/// Result of a run that went through every item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    /// Items whose cycle finished, whatever the outcome
    pub completed: usize,
    pub triggered: usize,
    pub timed_out: usize,
    pub faulted: usize,
    pub elapsed: Duration,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
