//! Progress reporting abstraction for download runs
//!
//! Defines the `ProgressReporter` trait for lifecycle event reporting
//! and provides a no-op and a channel-backed implementation.

use tokio::sync::mpsc;

use super::state::RunSummary;
use crate::embedded_context::CycleOutcome;
use crate::item_extractor::ItemDescriptor;

/// Trait for reporting run progress at key lifecycle events
///
/// Calls happen synchronously on the orchestrator's task, in order.
pub trait ProgressReporter: Send + Sync {
    /// Report that a run acquired the lock and is about to visit `total` items
    fn report_run_started(&self, total: usize);

    /// Report that the cycle for `item` (0-based `index`) is starting
    fn report_item_started(&self, item: &ItemDescriptor, index: usize, total: usize);

    /// Report how the cycle for `item` ended
    fn report_item_finished(&self, item: &ItemDescriptor, outcome: &CycleOutcome);

    /// Report the counters after an item finished
    fn report_progress(&self, completed: usize, total: usize);

    /// Report that every item was attempted
    fn report_completed(&self, summary: &RunSummary);

    /// Report an error that ended the run early
    fn report_error(&self, error: &str);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_run_started(&self, _total: usize) {}

    #[inline(always)]
    fn report_item_started(&self, _item: &ItemDescriptor, _index: usize, _total: usize) {}

    #[inline(always)]
    fn report_item_finished(&self, _item: &ItemDescriptor, _outcome: &CycleOutcome) {}

    #[inline(always)]
    fn report_progress(&self, _completed: usize, _total: usize) {}

    #[inline(always)]
    fn report_completed(&self, _summary: &RunSummary) {}

    #[inline(always)]
    fn report_error(&self, _error: &str) {}
}

/// Represents a run progress update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadProgress {
    RunStarted { total: usize },
    ItemStarted { item: ItemDescriptor, index: usize, total: usize },
    ItemFinished { item_id: String, outcome: CycleOutcome },
    Progress { completed: usize, total: usize },
    Completed(RunSummary),
    Error(String),
}

/// Forwards every report as a [`DownloadProgress`] over an unbounded channel
///
/// Sends after the receiver is gone are dropped.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    tx: mpsc::UnboundedSender<DownloadProgress>,
}

impl ChannelProgress {
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DownloadProgress>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: DownloadProgress) {
        let _ = self.tx.send(event);
    }
}

impl ProgressReporter for ChannelProgress {
    fn report_run_started(&self, total: usize) {
        self.send(DownloadProgress::RunStarted { total });
    }

    fn report_item_started(&self, item: &ItemDescriptor, index: usize, total: usize) {
        self.send(DownloadProgress::ItemStarted {
            item: item.clone(),
            index,
            total,
        });
    }

    fn report_item_finished(&self, item: &ItemDescriptor, outcome: &CycleOutcome) {
        self.send(DownloadProgress::ItemFinished {
            item_id: item.id.clone(),
            outcome: outcome.clone(),
        });
    }

    fn report_progress(&self, completed: usize, total: usize) {
        self.send(DownloadProgress::Progress { completed, total });
    }

    fn report_completed(&self, summary: &RunSummary) {
        self.send(DownloadProgress::Completed(summary.clone()));
    }

    fn report_error(&self, error: &str) {
        self.send(DownloadProgress::Error(error.to_string()));
    }
}
