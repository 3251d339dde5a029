//! DOM selectors of the listing page

use anyhow::{Result, anyhow};
use regex::Regex;
use scraper::Selector;

/// One entry of the installed-items list
pub const ITEM_SELECTOR: &str = r#"div[class*="Installed-Item-styles__root--"]"#;

/// Display name node inside an entry
pub const NAME_SELECTOR: &str = r#"div[class*="displayName--"]"#;

/// Compiled selectors for one detail path segment
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    pub(crate) item: Selector,
    pub(crate) link: Selector,
    pub(crate) name: Selector,
    pub(crate) id_pattern: Regex,
}

impl ListingSelectors {
    /// Build the selectors for links containing `detail_segment` (e.g. `/mods/`)
    ///
    /// # Errors
    ///
    /// Returns an error if the segment produces an invalid selector.
    pub fn for_detail_segment(detail_segment: &str) -> Result<Self> {
        let link_selector = format!(r#"a[href*="{detail_segment}"]"#);
        let id_pattern = format!(r"{}(\d+)", regex::escape(detail_segment));

        Ok(Self {
            item: parse_selector(ITEM_SELECTOR)?,
            link: parse_selector(&link_selector)?,
            name: parse_selector(NAME_SELECTOR)?,
            id_pattern: Regex::new(&id_pattern)
                .map_err(|e| anyhow!("Invalid id pattern '{id_pattern}': {e}"))?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow!("Invalid selector '{selector}': {e}"))
}
