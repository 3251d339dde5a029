//! Core configuration types for bulk download sessions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::i18n::Locale;
use crate::utils::{
    DEFAULT_CYCLE_TIMEOUT, DEFAULT_DETAIL_PATH_SEGMENT, DEFAULT_INTER_ITEM_DELAY,
    DEFAULT_RUN_MODE_MARKER, DEFAULT_SETTLE_DELAY, DEFAULT_TRIGGER_DELAY,
};

/// Main configuration struct for a download session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Listing page whose items are downloaded.
    ///
    /// **INVARIANT:** Always an absolute http(s) URL (validated in builder).
    pub(crate) listing_url: String,

    /// Run Chrome without a window.
    ///
    /// Off by default: the site needs a logged-in user, and the panel button
    /// lives in the visible listing tab.
    pub(crate) headless: bool,

    /// Chrome user data directory
    ///
    /// Kept between runs so the site login survives. When unset, a directory
    /// under the platform data dir is used.
    #[serde(skip)]
    pub(crate) chrome_data_dir: Option<PathBuf>,

    /// Where Chrome saves downloads; the platform download directory when unset
    pub(crate) download_dir: Option<PathBuf>,

    /// Forces the display locale instead of detecting it from the page
    pub(crate) locale: Option<Locale>,

    /// Upper bound of one load-and-trigger cycle
    ///
    /// Default: 30 seconds
    pub(crate) cycle_timeout: Duration,

    /// Wait after the detail page's load event before the cycle succeeds
    ///
    /// Default: 5 seconds
    pub(crate) settle_delay: Duration,

    /// Pause after each item
    ///
    /// Default: 3 seconds
    pub(crate) inter_item_delay: Duration,

    /// Wait inside the detail tab between its load event and the button scan
    ///
    /// Default: 2 seconds
    pub(crate) trigger_delay: Duration,

    /// Fragment marking a detail address as opened by the orchestrator
    pub(crate) run_mode_marker: String,

    /// Path segment every detail page address contains
    pub(crate) detail_path_segment: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            listing_url: String::new(),
            headless: false,
            chrome_data_dir: None,
            download_dir: None,
            locale: None,
            cycle_timeout: DEFAULT_CYCLE_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
            inter_item_delay: DEFAULT_INTER_ITEM_DELAY,
            trigger_delay: DEFAULT_TRIGGER_DELAY,
            run_mode_marker: DEFAULT_RUN_MODE_MARKER.to_string(),
            detail_path_segment: DEFAULT_DETAIL_PATH_SEGMENT.to_string(),
        }
    }
}

impl DownloadConfig {
    /// Set Chrome user data directory
    ///
    /// # Example
    /// ```rust
    /// # use kodegen_tools_bulkdl::config::DownloadConfig;
    /// # fn main() -> anyhow::Result<()> {
    /// let profile = std::env::temp_dir().join("bulkdl_profile");
    /// let config = DownloadConfig::builder()
    ///     .listing_url("https://mods.example.com/playsets/cities_skylines_2/42")
    ///     .build()?
    ///     .with_chrome_data_dir(profile);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn with_chrome_data_dir(mut self, dir: PathBuf) -> Self {
        self.chrome_data_dir = Some(dir);
        self
    }
}
