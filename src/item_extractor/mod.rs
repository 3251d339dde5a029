//! Item descriptor extraction from the listing page
//!
//! Reads the rendered listing HTML and produces the ordered list of items the
//! orchestrator will visit.

mod descriptor;
pub mod selectors;

use anyhow::{Context, Result};
use chromiumoxide::page::Page;
use scraper::Html;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

use crate::utils::page_helpers::get_page_url_with_fallback;
use crate::utils::{PLACEHOLDER_ITEM_NAME, origin_of};

pub use descriptor::ItemDescriptor;
pub use selectors::ListingSelectors;

/// Extract item descriptors from listing HTML
///
/// Entries are returned in document order. Entries without a detail link or
/// without an identifier in that link are skipped; repeated identifiers keep
/// their first occurrence.
///
/// # Errors
///
/// Returns an error if `page_url` has no usable origin.
pub fn extract_items(
    html: &str,
    page_url: &Url,
    selectors: &ListingSelectors,
) -> Result<Vec<ItemDescriptor>> {
    let origin = origin_of(page_url)?;
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for entry in document.select(&selectors.item) {
        let Some(href) = entry
            .select(&selectors.link)
            .next()
            .and_then(|link| link.value().attr("href"))
        else {
            continue;
        };

        let Some(id) = selectors
            .id_pattern
            .captures(href)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
        else {
            debug!("Skipping entry without item id: {href}");
            continue;
        };

        let detail_address = match origin.join(href) {
            Ok(url) => url,
            Err(e) => {
                debug!("Skipping entry with unresolvable link {href}: {e}");
                continue;
            }
        };

        if !seen.insert(id.clone()) {
            debug!("Skipping repeated item {id}");
            continue;
        }

        let name = entry
            .select(&selectors.name)
            .next()
            .map(|node| node.text().collect::<String>().trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_ITEM_NAME.to_string());

        items.push(ItemDescriptor::new(id, name, detail_address));
    }

    Ok(items)
}

/// Extract item descriptors from the live listing tab
pub async fn find_all_items(page: &Page, detail_segment: &str) -> Result<Vec<ItemDescriptor>> {
    let selectors = ListingSelectors::for_detail_segment(detail_segment)?;
    let page_url = get_page_url_with_fallback(page).await;
    let page_url = Url::parse(&page_url).context("Listing tab has no usable URL")?;
    let html = page
        .content()
        .await
        .context("Failed to read listing page content")?;

    let items = extract_items(&html, &page_url, &selectors)?;
    debug!("Found {} items on {page_url}", items.len());
    Ok(items)
}
