//! Shared configuration constants for bulkdl
//!
//! Default timings and wire conventions used throughout the codebase so the
//! orchestrator, the in-tab trigger and the config builder agree on them.

use std::time::Duration;

/// Upper bound for a single load-and-trigger cycle
///
/// A detail page that never fires its load event is abandoned after this
/// long and the run moves on to the next item.
pub const DEFAULT_CYCLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Time granted to the in-tab trigger after the load event
///
/// Must exceed [`DEFAULT_TRIGGER_DELAY`] so the click happens while the tab
/// is still alive.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(5);

/// Pause between two items
///
/// Keeps the request cadence close to a human clicking through the list.
pub const DEFAULT_INTER_ITEM_DELAY: Duration = Duration::from_secs(3);

/// Delay between the detail page's load event and the button scan
pub const DEFAULT_TRIGGER_DELAY: Duration = Duration::from_secs(2);

/// Fragment appended to detail addresses opened by the orchestrator
pub const DEFAULT_RUN_MODE_MARKER: &str = "autodownload";

/// Path segment shared by every item detail page
pub const DEFAULT_DETAIL_PATH_SEGMENT: &str = "/mods/";

/// Name used when an item's display name cannot be extracted
pub const PLACEHOLDER_ITEM_NAME: &str = "Unknown mod";

/// Name of the DevTools binding the listing-page panel calls into
pub const CONTROL_BINDING_NAME: &str = "__bulkdlSignal";

/// Chrome user agent string for stealth mode
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
///
/// Reference: https://chromiumdash.appspot.com/schedule
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
