//! Browser shutdown once the listing session ends

use anyhow::Result;
use chromiumoxide::Browser;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Result of cleanup operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupResult {
    /// All cleanup operations succeeded
    Success,
    /// Some cleanup operations failed, with error details
    PartialFailure(Vec<String>),
}

/// Close the browser, wait for the process, then stop the CDP handler
///
/// The profile directory is left in place so the site login persists.
pub async fn close_browser(browser: Arc<Browser>, handler: JoinHandle<()>) -> Result<CleanupResult> {
    let mut errors = Vec::new();

    match Arc::try_unwrap(browser) {
        Ok(mut browser) => {
            debug!(target: "bulkdl::cleanup", "Closing browser");
            if let Err(e) = browser.close().await {
                warn!(target: "bulkdl::cleanup", "Failed to close browser: {e}");
                errors.push(format!("Browser close failed: {e}"));
            }

            debug!(target: "bulkdl::cleanup", "Waiting for browser process to exit");
            if let Err(e) = browser.wait().await {
                warn!(target: "bulkdl::cleanup", "Failed to wait for browser exit: {e}");
                errors.push(format!("Browser wait failed: {e}"));
            }
        }
        Err(_) => {
            warn!(target: "bulkdl::cleanup", "Browser still shared at shutdown, dropping handle");
            errors.push("Browser still in use at shutdown".to_string());
        }
    }

    handler.abort();

    if errors.is_empty() {
        Ok(CleanupResult::Success)
    } else {
        Ok(CleanupResult::PartialFailure(errors))
    }
}
