//! URL utilities for listing and detail addresses.
//!
//! The run-mode marker is the only contract between the orchestrator and the
//! detail tab it opens, so both sides build and inspect it through here.

use anyhow::Result;
use url::Url;

/// Check if a URL is valid
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    // Skip data URLs, javascript URLs, and other non-http schemes
    if url.starts_with("data:") || url.starts_with("javascript:") || url.starts_with("mailto:") {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
        }
        Err(_) => false,
    }
}

/// Origin of a page as a URL with an empty path (`https://host[:port]/`)
///
/// Item links are resolved against this rather than the full listing path.
pub fn origin_of(page: &Url) -> Result<Url> {
    let origin = page.origin();
    if !origin.is_tuple() {
        return Err(anyhow::anyhow!("URL has an opaque origin: {page}"));
    }
    Url::parse(&origin.ascii_serialization())
        .map_err(|e| anyhow::anyhow!("Failed to parse origin of {page}: {e}"))
}

/// Detail address with the run-mode marker as its fragment
///
/// Any fragment already present on the detail address is replaced.
#[must_use]
pub fn with_run_mode_marker(detail_address: &Url, marker: &str) -> Url {
    let mut source = detail_address.clone();
    source.set_fragment(Some(marker));
    source
}

/// Whether a tab address was opened by the orchestrator
///
/// True when the path contains `detail_segment` and the fragment contains
/// `marker`. Unparseable addresses never match.
#[must_use]
pub fn has_run_mode_marker(address: &str, marker: &str, detail_segment: &str) -> bool {
    let Ok(url) = Url::parse(address) else {
        return false;
    };
    url.path().contains(detail_segment) && url.fragment().is_some_and(|f| f.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_replaces_existing_fragment() {
        let detail = Url::parse("https://mods.example.com/mods/78903/Windows#reviews").unwrap();
        let source = with_run_mode_marker(&detail, "autodownload");
        assert_eq!(
            source.as_str(),
            "https://mods.example.com/mods/78903/Windows#autodownload"
        );
    }

    #[test]
    fn marker_detection_requires_detail_path() {
        assert!(has_run_mode_marker(
            "https://mods.example.com/mods/1/Windows#autodownload",
            "autodownload",
            "/mods/"
        ));
        assert!(!has_run_mode_marker(
            "https://mods.example.com/playsets/x#autodownload",
            "autodownload",
            "/mods/"
        ));
        assert!(!has_run_mode_marker(
            "https://mods.example.com/mods/1/Windows",
            "autodownload",
            "/mods/"
        ));
        assert!(!has_run_mode_marker("not a url", "autodownload", "/mods/"));
    }

    #[test]
    fn origin_drops_path_and_query() {
        let page = Url::parse("https://mods.example.com:8443/playsets/cs2/abc?lang=de").unwrap();
        assert_eq!(origin_of(&page).unwrap().as_str(), "https://mods.example.com:8443/");
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(is_valid_url("https://example.com"));
        assert!(!is_valid_url("javascript:alert(1)"));
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url(""));
    }
}
