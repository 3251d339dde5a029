//! Embedded context management
//!
//! Hosts one item's detail page at a time in an isolated browsing context and
//! runs a single bounded load-and-trigger cycle on it. The manager never sees
//! inside the context: a host hands back a session handle plus a
//! single-resolution load signal, and that signal and the clock are all the
//! manager reacts to.

pub mod chromium;
pub mod cycle;

use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{Instant, sleep_until, timeout_at};
use tracing::{debug, error, info, warn};
use url::Url;
use uuid::Uuid;

use crate::item_extractor::ItemDescriptor;
use crate::utils::with_run_mode_marker;

pub use chromium::{ChromiumContextHost, ChromiumSession};
pub use cycle::{CycleOutcome, CyclePhase, CycleSignal};

/// Resolves once, when the hosted page reports that it finished loading
///
/// A dropped sender means the context went away before loading.
pub type LoadSignal = oneshot::Receiver<()>;

/// Failures inside the embedded context boundary
#[derive(Debug, Clone, thiserror::Error)]
pub enum ContextError {
    #[error("Failed to open embedded context: {0}")]
    Open(String),

    #[error("Failed to navigate embedded context to {address}: {message}")]
    Navigation { address: String, message: String },

    #[error("Embedded context closed before its page finished loading")]
    SignalLost,

    #[error("Failed to close embedded context: {0}")]
    Close(String),

    #[error("Browser is unavailable: {0}")]
    HostUnavailable(String),
}

/// Something that can create isolated browsing contexts
pub trait ContextHost: Send + Sync {
    type Session: ContextSession;

    /// Check that new contexts can still be created
    fn ensure_ready(&self) -> impl Future<Output = Result<(), ContextError>> + Send;

    /// Create a context and start loading `source_address` in it
    fn open(
        &self,
        source_address: Url,
    ) -> impl Future<Output = Result<(Self::Session, LoadSignal), ContextError>> + Send;
}

/// Handle to one live context
pub trait ContextSession: Send + Sync + 'static {
    /// Tear the context down and discard its contents
    fn close(self) -> impl Future<Output = Result<(), ContextError>> + Send;
}

/// Cycle timing bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTimings {
    /// Absolute bound from session creation
    pub timeout: Duration,
    /// Wait after the load signal before the cycle succeeds
    pub settle: Duration,
}

impl Default for CycleTimings {
    fn default() -> Self {
        Self {
            timeout: crate::utils::DEFAULT_CYCLE_TIMEOUT,
            settle: crate::utils::DEFAULT_SETTLE_DELAY,
        }
    }
}

/// One isolated context bound to one item
#[derive(Debug)]
pub struct EmbeddedContextSession<S> {
    pub id: Uuid,
    pub item_id: String,
    pub source_address: Url,
    pub deadline: Instant,
    inner: S,
}

/// Result of one cycle, as seen by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub item_id: String,
    pub outcome: CycleOutcome,
    pub elapsed: Duration,
}

/// Owns the single live embedded session
pub struct EmbeddedContextManager<H: ContextHost> {
    host: H,
    timings: CycleTimings,
    marker: String,
    active: Option<EmbeddedContextSession<H::Session>>,
}

impl<H: ContextHost> EmbeddedContextManager<H> {
    pub fn new(host: H, timings: CycleTimings, marker: impl Into<String>) -> Self {
        Self {
            host,
            timings,
            marker: marker.into(),
            active: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub fn timings(&self) -> CycleTimings {
        self.timings
    }

    /// The live session, if one exists
    pub fn active_session(&self) -> Option<&EmbeddedContextSession<H::Session>> {
        self.active.as_ref()
    }

    /// Run one bounded load-and-trigger cycle for `item`
    ///
    /// Never fails: open errors and lost load signals end the cycle as
    /// [`CycleOutcome::Faulted`], and a missing load signal ends it as
    /// [`CycleOutcome::TimedOut`] exactly at the deadline.
    pub async fn run_cycle(&mut self, item: &ItemDescriptor) -> CycleReport {
        self.teardown().await;

        info!("Starting download of {item}");
        let started = Instant::now();
        let source_address = with_run_mode_marker(&item.detail_address, &self.marker);
        let deadline = started + self.timings.timeout;

        let outcome = match timeout_at(deadline, self.host.open(source_address.clone())).await {
            Ok(Ok((inner, load_signal))) => {
                let session = EmbeddedContextSession {
                    id: Uuid::new_v4(),
                    item_id: item.id.clone(),
                    source_address,
                    deadline,
                    inner,
                };
                debug!(
                    "Opened embedded session {} for {}",
                    session.id, session.source_address
                );
                self.active = Some(session);
                drive_cycle(load_signal, deadline, self.timings.settle).await
            }
            Ok(Err(e)) => CycleOutcome::Faulted(e.to_string()),
            Err(_) => CycleOutcome::TimedOut,
        };

        match &outcome {
            CycleOutcome::Triggered => info!("Page for {item} loaded, download triggered"),
            CycleOutcome::TimedOut => warn!(
                "Download of {item} timed out after {:?}",
                self.timings.timeout
            ),
            CycleOutcome::Faulted(detail) => error!("Download of {item} failed: {detail}"),
        }

        CycleReport {
            item_id: item.id.clone(),
            outcome,
            elapsed: started.elapsed(),
        }
    }

    /// Close the live session, if any
    pub async fn teardown(&mut self) {
        if let Some(session) = self.active.take() {
            debug!("Closing embedded session {}", session.id);
            if let Err(e) = session.inner.close().await {
                warn!("Failed to close embedded session {}: {e}", session.id);
            }
        }
    }
}

async fn drive_cycle(
    mut load_signal: LoadSignal,
    deadline: Instant,
    settle: Duration,
) -> CycleOutcome {
    let expiry = sleep_until(deadline);
    tokio::pin!(expiry);

    let mut phase = CyclePhase::Loading;
    let mut settle_until = deadline;

    loop {
        let signal = match &phase {
            CyclePhase::Done(outcome) => return outcome.clone(),
            CyclePhase::Loading => tokio::select! {
                biased;
                () = &mut expiry => CycleSignal::DeadlineReached,
                loaded = &mut load_signal => match loaded {
                    Ok(()) => CycleSignal::Loaded,
                    Err(_) => CycleSignal::Fault(ContextError::SignalLost.to_string()),
                },
            },
            CyclePhase::Settling => tokio::select! {
                biased;
                () = &mut expiry => CycleSignal::DeadlineReached,
                () = sleep_until(settle_until) => CycleSignal::SettleElapsed,
            },
        };

        if signal == CycleSignal::Loaded {
            settle_until = Instant::now() + settle;
        }
        phase = phase.on(signal);
    }
}
