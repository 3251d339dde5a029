// Bulk downloader: opens the listing page in Chromium with a download panel.
//
// usage: kodegen-bulkdl <listing-url>

use anyhow::{Context, Result};
use kodegen_tools_bulkdl::{DownloadConfig, Locale, serve};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let listing_url = std::env::args()
        .nth(1)
        .context("usage: kodegen-bulkdl <listing-url>")?;

    let mut builder = DownloadConfig::builder().listing_url(listing_url);

    if let Ok(dir) = std::env::var("BULKDL_DOWNLOAD_DIR") {
        builder = builder.download_dir(dir);
    }
    if let Ok(tag) = std::env::var("BULKDL_LOCALE") {
        let locale: Locale = tag.parse().map_err(anyhow::Error::msg)?;
        builder = builder.locale(locale);
    }
    if let Ok(flag) = std::env::var("BULKDL_HEADLESS") {
        builder = builder.headless(matches!(flag.as_str(), "1" | "true" | "yes"));
    }

    serve(builder.build()?).await
}
