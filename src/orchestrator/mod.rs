//! Download orchestration
//!
//! Visits every discovered item exactly once, in order, one embedded context
//! at a time:
//! - Run lock with synchronous acquire and drop-based release
//! - One bounded cycle per item, per-item faults absorbed
//! - Fixed pause after each item
//! - Progress reporting via `ProgressReporter`
//! - Session teardown on every exit path

mod errors;
pub mod progress;
pub mod state;

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{error, info};

use crate::config::DownloadConfig;
use crate::embedded_context::{ContextHost, CycleTimings, EmbeddedContextManager};
use crate::item_extractor::ItemDescriptor;

pub use errors::{DownloadError, DownloadResult};
pub use progress::{ChannelProgress, DownloadProgress, NoOpProgress, ProgressReporter};
pub use state::{OrchestrationState, RunPhase, RunSummary};

use state::{RunContext, RunGuard};

pub struct DownloadOrchestrator<H: ContextHost> {
    manager: tokio::sync::Mutex<EmbeddedContextManager<H>>,
    running: AtomicBool,
    live_session: AtomicBool,
    state: Mutex<OrchestrationState>,
    inter_item_delay: Duration,
}

impl<H: ContextHost> DownloadOrchestrator<H> {
    pub fn new(
        host: H,
        timings: CycleTimings,
        inter_item_delay: Duration,
        marker: impl Into<String>,
    ) -> Self {
        Self {
            manager: tokio::sync::Mutex::new(EmbeddedContextManager::new(host, timings, marker)),
            running: AtomicBool::new(false),
            live_session: AtomicBool::new(false),
            state: Mutex::new(OrchestrationState::default()),
            inter_item_delay,
        }
    }

    pub fn from_config(host: H, config: &DownloadConfig) -> Self {
        Self::new(
            host,
            config.cycle_timings(),
            config.inter_item_delay(),
            config.run_mode_marker(),
        )
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn state(&self) -> OrchestrationState {
        self.state.lock().clone()
    }

    /// Whether an embedded session is open or being opened
    ///
    /// Between items the previous item's session stays open until the next
    /// cycle replaces it; after a run it is always closed.
    #[must_use]
    pub fn has_live_session(&self) -> bool {
        self.live_session.load(Ordering::Acquire)
    }

    /// Download every item in `items`, in order
    ///
    /// # Errors
    ///
    /// - [`DownloadError::NoItemsFound`] for an empty list
    /// - [`DownloadError::AlreadyRunning`] if another run holds the lock;
    ///   that run is not affected
    /// - [`DownloadError::Unrecoverable`] if the browser became unusable
    pub async fn run<P: ProgressReporter>(
        &self,
        items: Vec<ItemDescriptor>,
        progress: &P,
    ) -> DownloadResult<RunSummary> {
        // Lock check, empty check and acquire must stay ahead of the first await
        if self.is_running() {
            info!("Download request rejected, a run is already in progress");
            return Err(DownloadError::AlreadyRunning);
        }

        if items.is_empty() {
            return Err(DownloadError::NoItemsFound);
        }

        let Some(_guard) = RunGuard::acquire(&self.running, &self.state, items.len()) else {
            info!("Download request rejected, a run is already in progress");
            return Err(DownloadError::AlreadyRunning);
        };

        let mut ctx = RunContext::new(items.len());
        info!("Starting download run of {} items", ctx.total);
        progress.report_run_started(ctx.total);

        let mut manager = self.manager.lock().await;
        let result = self
            .process_items(&mut manager, &items, &mut ctx, progress)
            .await;
        manager.teardown().await;
        self.live_session.store(false, Ordering::Release);

        match result {
            Ok(()) => {
                let summary = ctx.summary();
                info!(
                    "Download run finished: {} triggered, {} timed out, {} failed",
                    summary.triggered, summary.timed_out, summary.faulted
                );
                progress.report_completed(&summary);
                Ok(summary)
            }
            Err(e) => {
                error!("Download run aborted: {e}");
                progress.report_error(&e.to_string());
                Err(e)
            }
        }
    }

    async fn process_items<P: ProgressReporter>(
        &self,
        manager: &mut EmbeddedContextManager<H>,
        items: &[ItemDescriptor],
        ctx: &mut RunContext,
        progress: &P,
    ) -> DownloadResult<()> {
        for (index, item) in items.iter().enumerate() {
            manager
                .host()
                .ensure_ready()
                .await
                .map_err(|e| DownloadError::Unrecoverable {
                    completed: ctx.completed,
                    total: ctx.total,
                    detail: e.to_string(),
                })?;

            self.state.lock().set_active(Some(item.clone()));
            progress.report_item_started(item, index, ctx.total);

            self.live_session.store(true, Ordering::Release);
            let report = manager.run_cycle(item).await;
            self.live_session
                .store(manager.active_session().is_some(), Ordering::Release);

            ctx.record(&report.outcome);
            {
                let mut state = self.state.lock();
                state.record_completion(ctx.completed);
                state.set_active(None);
            }
            progress.report_item_finished(item, &report.outcome);
            progress.report_progress(ctx.completed, ctx.total);

            tokio::time::sleep(self.inter_item_delay).await;
        }

        Ok(())
    }
}
