//! Control surface
//!
//! The user-facing side of a run: the start button flow, the confirmation,
//! the alerts and the live progress readout.

pub mod js_scripts;
pub mod page_surface;

use anyhow::Result;
use std::future::Future;
use tracing::{debug, warn};

use crate::embedded_context::ContextHost;
use crate::i18n::{MessageKey, Messages};
use crate::item_extractor::ItemDescriptor;
use crate::orchestrator::{
    ChannelProgress, DownloadError, DownloadOrchestrator, DownloadProgress, RunSummary,
};

pub use page_surface::PageControlSurface;

/// Where prompts and the progress readout are shown
pub trait ControlSurface: Send + Sync {
    /// Ask a yes/no question
    fn confirm(&self, message: &str) -> impl Future<Output = bool> + Send;

    fn alert(&self, message: &str) -> impl Future<Output = ()> + Send;

    fn show_status(&self, text: &str) -> impl Future<Output = ()> + Send;

    fn hide_status(&self) -> impl Future<Output = ()> + Send;
}

/// How a start request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    AlreadyRunning,
    NoItems,
    Declined,
    Completed(RunSummary),
    Failed(String),
}

pub struct ControlPanel<S> {
    surface: S,
    messages: Messages,
}

impl<S: ControlSurface> ControlPanel<S> {
    pub fn new(surface: S, messages: Messages) -> Self {
        Self { surface, messages }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn messages(&self) -> Messages {
        self.messages
    }

    /// Handle one press of the start button
    ///
    /// `discover` is only called when no run is active. A discovery error is
    /// logged and treated as an empty listing.
    pub async fn on_start_requested<H, F, Fut>(
        &self,
        orchestrator: &DownloadOrchestrator<H>,
        discover: F,
    ) -> StartOutcome
    where
        H: ContextHost,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<ItemDescriptor>>>,
    {
        if orchestrator.is_running() {
            self.alert(MessageKey::DownloadingAlert).await;
            return StartOutcome::AlreadyRunning;
        }

        let items = match discover().await {
            Ok(items) => items,
            Err(e) => {
                warn!("Item discovery failed: {e:#}");
                Vec::new()
            }
        };

        if items.is_empty() {
            self.alert(MessageKey::NoModsFound).await;
            return StartOutcome::NoItems;
        }

        let total = items.len();
        let question = self.messages.text(MessageKey::ConfirmDownload, &[&total]);
        if !self.surface.confirm(&question).await {
            debug!("Download of {total} items declined");
            return StartOutcome::Declined;
        }

        // The readout starts at `RunStarted`, sent only once the run lock is held
        let (reporter, events) = ChannelProgress::new();
        let run = async move { orchestrator.run(items, &reporter).await };
        let (result, ()) = tokio::join!(run, self.render_progress(events));

        let outcome = match result {
            Ok(summary) => {
                self.alert(MessageKey::DownloadComplete).await;
                StartOutcome::Completed(summary)
            }
            // No readout was drawn; any on screen belongs to another run
            Err(DownloadError::AlreadyRunning) => {
                self.alert(MessageKey::DownloadingAlert).await;
                return StartOutcome::AlreadyRunning;
            }
            Err(DownloadError::NoItemsFound) => {
                self.alert(MessageKey::NoModsFound).await;
                return StartOutcome::NoItems;
            }
            Err(e @ DownloadError::Unrecoverable { .. }) => {
                let detail = e.to_string();
                let message = self.messages.text(MessageKey::DownloadError, &[&detail]);
                self.surface.alert(&message).await;
                StartOutcome::Failed(detail)
            }
        };

        self.surface.hide_status().await;
        outcome
    }

    async fn render_progress(
        &self,
        mut events: tokio::sync::mpsc::UnboundedReceiver<DownloadProgress>,
    ) {
        while let Some(event) = events.recv().await {
            let (completed, total) = match event {
                DownloadProgress::RunStarted { total } => (0, total),
                DownloadProgress::Progress { completed, total } => (completed, total),
                _ => continue,
            };
            self.surface
                .show_status(&self.progress_text(completed, total))
                .await;
        }
    }

    fn progress_text(&self, completed: usize, total: usize) -> String {
        self.messages
            .text(MessageKey::ProgressStatus, &[&completed, &total])
    }

    async fn alert(&self, key: MessageKey) {
        let message = self.messages.text(key, &[]);
        self.surface.alert(&message).await;
    }
}
