//! Remote action trigger
//!
//! Runs inside a detail tab that was opened with the run-mode marker: finds
//! the site's own download button and clicks it. Nothing is reported back to
//! the orchestrator; the click and a log line are the only effects.
//!
//! Matching is free-text over the button labels, so a site wording change
//! shows up as `ActionNotFound` and the cycle ends through its timeout.

use anyhow::{Context, Result};
use chromiumoxide::page::Page;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::DownloadConfig;
use crate::utils::has_run_mode_marker;
use crate::utils::page_helpers::{get_element_text_with_fallback, get_page_url_with_fallback};

/// Download-button wording in every supported locale, lower case
pub const DOWNLOAD_TERMS: &[&str] = &["download", "下载", "ダウンロード", "herunterladen"];

/// Whether a control label names the download action
#[must_use]
pub fn matches_download_label(label: &str) -> bool {
    let label = label.trim().to_lowercase();
    DOWNLOAD_TERMS.iter().any(|term| label.contains(term))
}

/// Index of the first label naming the download action
#[must_use]
pub fn select_download_control<S: AsRef<str>>(labels: &[S]) -> Option<usize> {
    labels
        .iter()
        .position(|label| matches_download_label(label.as_ref()))
}

/// What the trigger did in one tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    Clicked { label: String },
    /// The tab was not opened by the orchestrator
    NotArmed,
    ActionNotFound,
}

#[derive(Debug, Clone)]
pub struct RemoteActionTrigger {
    marker: String,
    detail_segment: String,
    delay: Duration,
}

impl RemoteActionTrigger {
    pub fn new(marker: impl Into<String>, detail_segment: impl Into<String>, delay: Duration) -> Self {
        Self {
            marker: marker.into(),
            detail_segment: detail_segment.into(),
            delay,
        }
    }

    #[must_use]
    pub fn from_config(config: &DownloadConfig) -> Self {
        Self::new(
            config.run_mode_marker(),
            config.detail_path_segment(),
            config.trigger_delay(),
        )
    }

    /// Whether a tab at `address` should auto-run the trigger
    #[must_use]
    pub fn is_armed_for(&self, address: &str) -> bool {
        has_run_mode_marker(address, &self.marker, &self.detail_segment)
    }

    /// Run against a tab whose load event just fired
    ///
    /// # Errors
    ///
    /// Returns an error only on browser communication failures.
    pub async fn run_on(&self, page: &Page) -> Result<TriggerOutcome> {
        let address = get_page_url_with_fallback(page).await;
        if !self.is_armed_for(&address) {
            debug!("Tab {address} was not opened for download, trigger idle");
            return Ok(TriggerOutcome::NotArmed);
        }

        tokio::time::sleep(self.delay).await;
        debug!("Detail page {address} ready, looking for the download button");

        let buttons = page
            .find_elements("button")
            .await
            .context("Failed to query buttons")?;

        let mut labels = Vec::with_capacity(buttons.len());
        for button in &buttons {
            labels.push(get_element_text_with_fallback(button, "").await);
        }

        let Some(index) = select_download_control(&labels) else {
            warn!("No download button found on {address}");
            return Ok(TriggerOutcome::ActionNotFound);
        };

        buttons[index]
            .call_js_fn("function() { this.click(); }", false)
            .await
            .context("Failed to click the download button")?;

        let label = labels[index].trim().to_string();
        info!("Clicked download button '{label}' on {address}");
        Ok(TriggerOutcome::Clicked { label })
    }
}
