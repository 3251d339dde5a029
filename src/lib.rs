pub mod app;
pub mod browser_setup;
pub mod config;
pub mod control_surface;
pub mod embedded_context;
pub mod i18n;
pub mod item_extractor;
pub mod orchestrator;
pub mod remote_trigger;
pub mod utils;

pub use app::serve;
pub use browser_setup::{
    allow_downloads, default_profile_dir, download_managed_browser, find_browser_executable,
    launch_browser,
};
pub use config::DownloadConfig;
pub use control_surface::{ControlPanel, ControlSurface, PageControlSurface, StartOutcome};
pub use embedded_context::{
    ChromiumContextHost, ContextError, ContextHost, ContextSession, CycleOutcome, CycleReport,
    CycleTimings, EmbeddedContextManager,
};
pub use i18n::{Locale, MessageKey, Messages};
pub use item_extractor::{ItemDescriptor, extract_items, find_all_items};
pub use orchestrator::{
    ChannelProgress, DownloadError, DownloadOrchestrator, DownloadProgress, DownloadResult,
    NoOpProgress, OrchestrationState, ProgressReporter, RunPhase, RunSummary,
};
pub use remote_trigger::{RemoteActionTrigger, TriggerOutcome};
