//! Helper functions for consistent chromiumoxide Page error handling
//!
//! These functions provide standardized error handling for common Page operations
//! that may fail (browser communication errors) or return None (value not yet available).

use anyhow::{Context, Result};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use serde::de::DeserializeOwned;
use tracing::trace;

/// Get page URL with diagnostic fallback
///
/// Handles two failure modes:
/// 1. `Err(e)` - Browser communication failure (logs at trace level)
/// 2. `Ok(None)` - Page has no URL yet (treated as empty)
///
/// Returns `"about:blank"` on any failure so marker checks simply fail.
pub async fn get_page_url_with_fallback(page: &Page) -> String {
    match page.url().await {
        Ok(Some(url)) => url,
        Ok(None) => {
            trace!("Page URL is None (page not yet navigated)");
            "about:blank".to_string()
        }
        Err(e) => {
            trace!("Failed to get page URL (browser communication error): {}", e);
            "about:blank".to_string()
        }
    }
}

/// Get element inner text with fallback
///
/// Returns provided fallback string on any failure.
pub async fn get_element_text_with_fallback(element: &Element, fallback: &str) -> String {
    element
        .inner_text()
        .await
        .ok()
        .flatten()
        .unwrap_or_else(|| fallback.to_string())
}

/// Evaluate a script and deserialize its JSON result
pub async fn evaluate_json<T: DeserializeOwned>(page: &Page, script: &str) -> Result<T> {
    let js_result = page
        .evaluate(script)
        .await
        .context("Failed to execute page script")?;

    let value: serde_json::Value = js_result
        .into_value()
        .map_err(|e| anyhow::anyhow!("Failed to get script result value: {e}"))?;

    serde_json::from_value(value).context("Failed to parse script result")
}
