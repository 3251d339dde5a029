//! Getter methods for `DownloadConfig`

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::types::DownloadConfig;
use crate::embedded_context::CycleTimings;
use crate::i18n::Locale;

impl DownloadConfig {
    #[must_use]
    pub fn listing_url(&self) -> &str {
        &self.listing_url
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn chrome_data_dir(&self) -> Option<&PathBuf> {
        self.chrome_data_dir.as_ref()
    }

    #[must_use]
    pub fn download_dir(&self) -> Option<&Path> {
        self.download_dir.as_deref()
    }

    #[must_use]
    pub fn locale(&self) -> Option<Locale> {
        self.locale
    }

    #[must_use]
    pub fn cycle_timeout(&self) -> Duration {
        self.cycle_timeout
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    #[must_use]
    pub fn inter_item_delay(&self) -> Duration {
        self.inter_item_delay
    }

    #[must_use]
    pub fn trigger_delay(&self) -> Duration {
        self.trigger_delay
    }

    #[must_use]
    pub fn run_mode_marker(&self) -> &str {
        &self.run_mode_marker
    }

    #[must_use]
    pub fn detail_path_segment(&self) -> &str {
        &self.detail_path_segment
    }

    /// Timings of one embedded-context cycle
    #[must_use]
    pub fn cycle_timings(&self) -> CycleTimings {
        CycleTimings {
            timeout: self.cycle_timeout,
            settle: self.settle_delay,
        }
    }
}
