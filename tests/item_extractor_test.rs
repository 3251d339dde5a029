//! Listing page parsing

use kodegen_tools_bulkdl::item_extractor::{ListingSelectors, extract_items};
use url::Url;

fn entry(href: Option<&str>, name: Option<&str>) -> String {
    let link = href.map_or_else(String::new, |href| format!(r#"<a href="{href}">open</a>"#));
    let name = name.map_or_else(String::new, |name| {
        format!(r#"<div class="Installed-Item-styles__displayName--x1">{name}</div>"#)
    });
    format!(r#"<div class="Installed-Item-styles__root--a9f3">{name}{link}</div>"#)
}

fn listing(entries: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><body><main>{}</main></body></html>",
        entries.concat()
    )
}

fn parse(html: &str) -> Vec<kodegen_tools_bulkdl::ItemDescriptor> {
    let page = Url::parse("https://mods.example.com/en/installed?page=2").unwrap();
    let selectors = ListingSelectors::for_detail_segment("/mods/").unwrap();
    extract_items(html, &page, &selectors).unwrap()
}

#[test]
fn extracts_entries_in_document_order() {
    let html = listing(&[
        entry(Some("/mods/42"), Some("  Better Trees  ")),
        entry(Some("https://mods.example.com/mods/7?tab=files"), Some("Rain")),
    ]);

    let items = parse(&html);

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "42");
    assert_eq!(items[0].name, "Better Trees");
    assert_eq!(items[0].detail_address.as_str(), "https://mods.example.com/mods/42");
    assert_eq!(items[1].id, "7");
    assert_eq!(
        items[1].detail_address.as_str(),
        "https://mods.example.com/mods/7?tab=files"
    );
}

#[test]
fn relative_links_resolve_against_the_origin() {
    let html = listing(&[entry(Some("./mods/5"), Some("Fog"))]);

    let items = parse(&html);

    assert_eq!(items[0].detail_address.as_str(), "https://mods.example.com/mods/5");
}

#[test]
fn entries_without_link_or_id_are_skipped() {
    let html = listing(&[
        entry(None, Some("No link")),
        entry(Some("/mods/latest"), Some("No id")),
        entry(Some("/mods/9"), Some("Kept")),
    ]);

    let items = parse(&html);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "9");
}

#[test]
fn missing_name_uses_the_placeholder() {
    let html = listing(&[
        entry(Some("/mods/1"), None),
        entry(Some("/mods/2"), Some("   ")),
    ]);

    let items = parse(&html);

    assert_eq!(items[0].name, "Unknown mod");
    assert_eq!(items[1].name, "Unknown mod");
}

#[test]
fn repeated_ids_keep_the_first_entry() {
    let html = listing(&[
        entry(Some("/mods/3"), Some("First")),
        entry(Some("/mods/4"), Some("Other")),
        entry(Some("/mods/3"), Some("Duplicate")),
    ]);

    let items = parse(&html);

    let ids: Vec<_> = items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "4"]);
    assert_eq!(items[0].name, "First");
}

#[test]
fn links_outside_entries_are_ignored() {
    let html = format!(
        r#"<html><body><a href="/mods/99">stray</a>{}</body></html>"#,
        entry(Some("/mods/1"), Some("Inside"))
    );

    let items = parse(&html);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "1");
}

#[test]
fn empty_listing_yields_no_items() {
    assert!(parse(&listing(&[])).is_empty());
}

#[test]
fn display_names_the_item_and_its_id() {
    let html = listing(&[entry(Some("/mods/42"), Some("Better Trees"))]);
    assert_eq!(parse(&html)[0].to_string(), "Better Trees (ID: 42)");
}

#[test]
fn descriptors_serialize_with_their_detail_address() {
    let html = listing(&[entry(Some("/mods/42"), Some("Better Trees"))]);
    let item = parse(&html).remove(0);

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["detail_address"], "https://mods.example.com/mods/42");

    let back: kodegen_tools_bulkdl::ItemDescriptor = serde_json::from_value(json).unwrap();
    assert_eq!(back, item);
}
