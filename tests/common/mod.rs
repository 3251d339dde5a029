//! Scripted browser doubles shared by the integration tests

#![allow(dead_code)]

use kodegen_tools_bulkdl::control_surface::ControlSurface;
use kodegen_tools_bulkdl::embedded_context::{
    ContextError, ContextHost, ContextSession, LoadSignal,
};
use kodegen_tools_bulkdl::orchestrator::{DownloadProgress, ProgressReporter, RunSummary};
use kodegen_tools_bulkdl::{CycleOutcome, ItemDescriptor};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use url::Url;

/// How a scripted context behaves after it is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadBehavior {
    /// Fire the load signal after the given delay
    LoadAfter(Duration),
    /// Keep the signal pending forever
    NeverLoad,
    /// Fail the open call
    FailOpen,
    /// Drop the signal without firing it
    DropSignal,
}

#[derive(Debug, Default)]
pub struct HostLog {
    pub opens: Vec<(Instant, String)>,
    pub closes: Vec<(Instant, String)>,
    pub live: usize,
    pub max_live: usize,
}

/// Context host driven by a per-item script
///
/// Items are identified by the last path segment of their detail address.
#[derive(Clone)]
pub struct ScriptedHost {
    log: Arc<Mutex<HostLog>>,
    behaviors: Arc<HashMap<String, LoadBehavior>>,
    default_behavior: LoadBehavior,
    fail_ready_after_opens: Option<usize>,
}

impl ScriptedHost {
    pub fn new(default_behavior: LoadBehavior) -> Self {
        Self {
            log: Arc::new(Mutex::new(HostLog::default())),
            behaviors: Arc::new(HashMap::new()),
            default_behavior,
            fail_ready_after_opens: None,
        }
    }

    pub fn with_behavior(mut self, item_id: &str, behavior: LoadBehavior) -> Self {
        Arc::make_mut(&mut self.behaviors).insert(item_id.to_string(), behavior);
        self
    }

    /// Make `ensure_ready` fail once `opens` contexts have been opened
    pub fn fail_ready_after(mut self, opens: usize) -> Self {
        self.fail_ready_after_opens = Some(opens);
        self
    }

    pub fn log(&self) -> Arc<Mutex<HostLog>> {
        Arc::clone(&self.log)
    }

    pub fn opened_ids(&self) -> Vec<String> {
        self.log
            .lock()
            .opens
            .iter()
            .map(|(_, address)| item_id_of(address))
            .collect()
    }

    fn behavior_for(&self, item_id: &str) -> LoadBehavior {
        self.behaviors
            .get(item_id)
            .copied()
            .unwrap_or(self.default_behavior)
    }
}

fn item_id_of(address: &str) -> String {
    Url::parse(address)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .unwrap_or_default()
}

pub struct ScriptedSession {
    address: String,
    log: Arc<Mutex<HostLog>>,
    _pending: Option<oneshot::Sender<()>>,
    loader: Option<JoinHandle<()>>,
}

impl ContextHost for ScriptedHost {
    type Session = ScriptedSession;

    async fn ensure_ready(&self) -> Result<(), ContextError> {
        match self.fail_ready_after_opens {
            Some(limit) if self.log.lock().opens.len() >= limit => {
                Err(ContextError::HostUnavailable("browser crashed".to_string()))
            }
            _ => Ok(()),
        }
    }

    async fn open(&self, source_address: Url) -> Result<(ScriptedSession, LoadSignal), ContextError> {
        let address = source_address.to_string();
        let behavior = self.behavior_for(&item_id_of(&address));

        if behavior == LoadBehavior::FailOpen {
            return Err(ContextError::Open("tab refused".to_string()));
        }

        {
            let mut log = self.log.lock();
            log.opens.push((Instant::now(), address.clone()));
            log.live += 1;
            log.max_live = log.max_live.max(log.live);
        }

        let (tx, rx) = oneshot::channel();
        let mut session = ScriptedSession {
            address,
            log: Arc::clone(&self.log),
            _pending: None,
            loader: None,
        };

        match behavior {
            LoadBehavior::LoadAfter(delay) => {
                session.loader = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(());
                }));
            }
            LoadBehavior::NeverLoad => session._pending = Some(tx),
            LoadBehavior::DropSignal | LoadBehavior::FailOpen => drop(tx),
        }

        Ok((session, rx))
    }
}

impl ContextSession for ScriptedSession {
    async fn close(mut self) -> Result<(), ContextError> {
        if let Some(loader) = self.loader.take() {
            loader.abort();
        }
        let mut log = self.log.lock();
        log.closes.push((Instant::now(), self.address.clone()));
        log.live -= 1;
        Ok(())
    }
}

/// Items `ids` under `https://mods.example.com/mods/<id>`
pub fn items(ids: &[&str]) -> Vec<ItemDescriptor> {
    ids.iter()
        .map(|id| {
            ItemDescriptor::new(
                *id,
                format!("Mod {id}"),
                Url::parse(&format!("https://mods.example.com/mods/{id}"))
                    .expect("valid test URL"),
            )
        })
        .collect()
}

/// Progress reporter that keeps every event with its timestamp
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<(Instant, DownloadProgress)>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<(Instant, DownloadProgress)> {
        self.events.lock().clone()
    }

    pub fn progress(&self) -> Vec<(Instant, usize, usize)> {
        self.events
            .lock()
            .iter()
            .filter_map(|(at, event)| match event {
                DownloadProgress::Progress { completed, total } => Some((*at, *completed, *total)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: DownloadProgress) {
        self.events.lock().push((Instant::now(), event));
    }
}

impl ProgressReporter for RecordingReporter {
    fn report_run_started(&self, total: usize) {
        self.push(DownloadProgress::RunStarted { total });
    }

    fn report_item_started(&self, item: &ItemDescriptor, index: usize, total: usize) {
        self.push(DownloadProgress::ItemStarted {
            item: item.clone(),
            index,
            total,
        });
    }

    fn report_item_finished(&self, item: &ItemDescriptor, outcome: &CycleOutcome) {
        self.push(DownloadProgress::ItemFinished {
            item_id: item.id.clone(),
            outcome: outcome.clone(),
        });
    }

    fn report_progress(&self, completed: usize, total: usize) {
        self.push(DownloadProgress::Progress { completed, total });
    }

    fn report_completed(&self, summary: &RunSummary) {
        self.push(DownloadProgress::Completed(summary.clone()));
    }

    fn report_error(&self, error: &str) {
        self.push(DownloadProgress::Error(error.to_string()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Confirm(String),
    Alert(String),
    Status(String),
    HideStatus,
}

/// Control surface that records calls and answers confirmations with a fixed value
pub struct FakeSurface {
    answer: bool,
    calls: Mutex<Vec<SurfaceCall>>,
}

impl FakeSurface {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().clone()
    }
}

impl ControlSurface for FakeSurface {
    async fn confirm(&self, message: &str) -> bool {
        self.calls.lock().push(SurfaceCall::Confirm(message.to_string()));
        self.answer
    }

    async fn alert(&self, message: &str) {
        self.calls.lock().push(SurfaceCall::Alert(message.to_string()));
    }

    async fn show_status(&self, text: &str) {
        self.calls.lock().push(SurfaceCall::Status(text.to_string()));
    }

    async fn hide_status(&self) {
        self.calls.lock().push(SurfaceCall::HideStatus);
    }
}
