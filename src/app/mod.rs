//! Interactive session wiring
//!
//! Launches the browser, opens the listing tab, installs the control panel and
//! serves start requests until the tab closes or the process is interrupted.

pub mod cleanup;

use anyhow::{Context, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::browser_setup::{allow_downloads, default_profile_dir, launch_browser};
use crate::config::DownloadConfig;
use crate::control_surface::{ControlPanel, PageControlSurface, StartOutcome};
use crate::embedded_context::ChromiumContextHost;
use crate::i18n::{LANGUAGE_HINTS_SCRIPT, Locale, Messages, PageLanguageHints, detect_locale};
use crate::item_extractor::find_all_items;
use crate::orchestrator::DownloadOrchestrator;
use crate::remote_trigger::RemoteActionTrigger;
use crate::utils::page_helpers::evaluate_json;
use crate::utils::page_timeout::with_page_timeout;

pub use cleanup::{CleanupResult, close_browser};

const LISTING_LOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Run one interactive session against `config.listing_url()`
pub async fn serve(config: DownloadConfig) -> Result<()> {
    let profile_dir = config
        .chrome_data_dir()
        .cloned()
        .unwrap_or_else(default_profile_dir);

    let (browser, handler) = launch_browser(config.headless(), &profile_dir).await?;
    let browser = Arc::new(browser);

    let result = serve_with_browser(&browser, &config).await;

    match close_browser(browser, handler).await {
        Ok(CleanupResult::Success) => debug!("Browser shut down cleanly"),
        Ok(CleanupResult::PartialFailure(errors)) => {
            warn!("Browser shutdown incomplete: {}", errors.join("; "));
        }
        Err(e) => warn!("Browser shutdown failed: {e:#}"),
    }

    result
}

async fn serve_with_browser(browser: &Arc<Browser>, config: &DownloadConfig) -> Result<()> {
    allow_downloads(browser, config.download_dir()).await?;

    let listing = open_listing(browser, config.listing_url()).await?;
    let locale = match config.locale() {
        Some(locale) => locale,
        None => page_locale(&listing).await,
    };
    info!("Using {locale} messages");
    let messages = Messages::new(locale);

    let (surface, mut presses) = PageControlSurface::install(listing.clone(), &messages).await?;
    let panel = ControlPanel::new(surface, messages);

    let host = ChromiumContextHost::new(Arc::clone(browser), RemoteActionTrigger::from_config(config));
    let orchestrator = DownloadOrchestrator::from_config(host, config);
    let segment = config.detail_path_segment();

    info!("Control panel ready on {}", config.listing_url());

    let mut requests = FuturesUnordered::new();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            press = presses.recv() => {
                let Some(()) = press else {
                    info!("Listing tab closed");
                    break;
                };
                requests.push(panel.on_start_requested(&orchestrator, || {
                    find_all_items(&listing, segment)
                }));
            }
            Some(outcome) = requests.next(), if !requests.is_empty() => {
                log_outcome(&outcome);
            }
            _ = &mut shutdown => {
                info!("Interrupted, shutting down");
                break;
            }
        }
    }

    if orchestrator.is_running() {
        let state = orchestrator.state();
        warn!(
            "Abandoning run after {}/{} items",
            state.completed, state.total
        );
    }

    Ok(())
}

async fn open_listing(browser: &Browser, listing_url: &str) -> Result<Page> {
    let page = with_page_timeout(
        async {
            browser
                .new_page(listing_url)
                .await
                .context("Failed to open listing tab")
        },
        LISTING_LOAD_TIMEOUT,
        "Listing tab open",
    )
    .await?;

    with_page_timeout(
        async {
            page.wait_for_navigation()
                .await
                .map(|_| ())
                .context("Failed to wait for listing page load")
        },
        LISTING_LOAD_TIMEOUT,
        "Listing page load",
    )
    .await?;

    Ok(page)
}

async fn page_locale(page: &Page) -> Locale {
    match evaluate_json::<PageLanguageHints>(page, LANGUAGE_HINTS_SCRIPT).await {
        Ok(hints) => detect_locale(&hints),
        Err(e) => {
            warn!("Language detection failed, using English: {e:#}");
            Locale::default()
        }
    }
}

fn log_outcome(outcome: &StartOutcome) {
    match outcome {
        StartOutcome::Completed(summary) => info!(
            "Run finished: {} items ({} triggered, {} timed out, {} faulted) in {:?}",
            summary.completed, summary.triggered, summary.timed_out, summary.faulted, summary.elapsed
        ),
        StartOutcome::Failed(detail) => warn!("Run failed: {detail}"),
        StartOutcome::AlreadyRunning => debug!("Start ignored, run in progress"),
        StartOutcome::NoItems => info!("No items found on the listing page"),
        StartOutcome::Declined => debug!("Run declined"),
    }
}
