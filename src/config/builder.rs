//! Type-safe builder for `DownloadConfig` using the typestate pattern
//!
//! The listing URL is the only required field; `build()` exists only once it
//! has been set.

use anyhow::{Result, anyhow};
use std::marker::PhantomData;
use std::path::PathBuf;
use std::time::Duration;

use super::types::DownloadConfig;
use crate::i18n::Locale;
use crate::utils::is_valid_url;

// Type states for the builder
pub struct WithListingUrl;

pub struct DownloadConfigBuilder<State = ()> {
    pub(crate) config: DownloadConfig,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for DownloadConfigBuilder<()> {
    fn default() -> Self {
        Self {
            config: DownloadConfig::default(),
            _phantom: PhantomData,
        }
    }
}

impl DownloadConfig {
    /// Create a builder for configuring a `DownloadConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> DownloadConfigBuilder<()> {
        DownloadConfigBuilder::default()
    }
}

impl DownloadConfigBuilder<()> {
    pub fn listing_url(self, url: impl Into<String>) -> DownloadConfigBuilder<WithListingUrl> {
        let url_string = url.into();

        // Normalize URL: add https:// if no scheme is present
        let normalized_url =
            if url_string.starts_with("http://") || url_string.starts_with("https://") {
                url_string
            } else {
                format!("https://{url_string}")
            };

        DownloadConfigBuilder {
            config: DownloadConfig {
                listing_url: normalized_url,
                ..self.config
            },
            _phantom: PhantomData,
        }
    }
}

impl<State> DownloadConfigBuilder<State> {
    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    #[must_use]
    pub fn chrome_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.chrome_data_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.download_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn locale(mut self, locale: Locale) -> Self {
        self.config.locale = Some(locale);
        self
    }

    #[must_use]
    pub fn cycle_timeout(mut self, timeout: Duration) -> Self {
        self.config.cycle_timeout = timeout;
        self
    }

    #[must_use]
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.config.settle_delay = delay;
        self
    }

    #[must_use]
    pub fn inter_item_delay(mut self, delay: Duration) -> Self {
        self.config.inter_item_delay = delay;
        self
    }

    #[must_use]
    pub fn trigger_delay(mut self, delay: Duration) -> Self {
        self.config.trigger_delay = delay;
        self
    }

    #[must_use]
    pub fn run_mode_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.run_mode_marker = marker.into();
        self
    }

    #[must_use]
    pub fn detail_path_segment(mut self, segment: impl Into<String>) -> Self {
        self.config.detail_path_segment = segment.into();
        self
    }
}

impl DownloadConfigBuilder<WithListingUrl> {
    /// Validate and produce the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the listing URL is not http(s), the marker is empty
    /// or contains `#`, the cycle timeout is zero, or the delays cannot fit
    /// inside one cycle (`trigger_delay < settle_delay < cycle_timeout`).
    pub fn build(self) -> Result<DownloadConfig> {
        let config = self.config;

        if !is_valid_url(&config.listing_url) {
            return Err(anyhow!("Invalid listing URL: {}", config.listing_url));
        }

        if config.run_mode_marker.is_empty() || config.run_mode_marker.contains('#') {
            return Err(anyhow!(
                "Run-mode marker must be non-empty and must not contain '#': {:?}",
                config.run_mode_marker
            ));
        }

        if config.detail_path_segment.is_empty() {
            return Err(anyhow!("Detail path segment must not be empty"));
        }

        if config.cycle_timeout.is_zero() {
            return Err(anyhow!("Cycle timeout must be greater than zero"));
        }

        if config.settle_delay >= config.cycle_timeout {
            return Err(anyhow!(
                "Settle delay ({:?}) must be shorter than the cycle timeout ({:?})",
                config.settle_delay,
                config.cycle_timeout
            ));
        }

        if config.trigger_delay >= config.settle_delay {
            return Err(anyhow!(
                "Trigger delay ({:?}) must be shorter than the settle delay ({:?})",
                config.trigger_delay,
                config.settle_delay
            ));
        }

        Ok(config)
    }
}
