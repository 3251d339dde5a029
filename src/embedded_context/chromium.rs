//! Chromium-backed embedded contexts
//!
//! Each session is its own browser tab (its own CDP target). The manager only
//! gets the tab's first real `Page.loadEventFired`; the remote trigger runs in
//! a task bound to the tab and is aborted with it.

use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use chromiumoxide_cdp::cdp::browser_protocol::page::{EventLoadEventFired, NavigateParams};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};
use url::Url;

use super::{ContextError, ContextHost, ContextSession, LoadSignal};
use crate::remote_trigger::RemoteActionTrigger;
use crate::utils::page_helpers::get_page_url_with_fallback;

pub struct ChromiumContextHost {
    browser: Arc<Browser>,
    trigger: Arc<RemoteActionTrigger>,
}

impl ChromiumContextHost {
    pub fn new(browser: Arc<Browser>, trigger: RemoteActionTrigger) -> Self {
        Self {
            browser,
            trigger: Arc::new(trigger),
        }
    }
}

/// One detail tab and the task watching it
pub struct ChromiumSession {
    page: Page,
    watcher: JoinHandle<()>,
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

impl ContextHost for ChromiumContextHost {
    type Session = ChromiumSession;

    async fn ensure_ready(&self) -> Result<(), ContextError> {
        self.browser
            .version()
            .await
            .map(|_| ())
            .map_err(|e| ContextError::HostUnavailable(e.to_string()))
    }

    async fn open(&self, source_address: Url) -> Result<(ChromiumSession, LoadSignal), ContextError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| ContextError::Open(e.to_string()))?;

        // Subscribe before navigating so the load event cannot be missed
        let mut loads = page
            .event_listener::<EventLoadEventFired>()
            .await
            .map_err(|e| ContextError::Open(e.to_string()))?;

        let (loaded_tx, loaded_rx) = oneshot::channel();
        let watched = page.clone();
        let trigger = Arc::clone(&self.trigger);
        let watcher = tokio::spawn(async move {
            while loads.next().await.is_some() {
                let address = get_page_url_with_fallback(&watched).await;
                if address == "about:blank" {
                    trace!("Ignoring load event of the blank tab");
                    continue;
                }

                debug!("Embedded page {address} finished loading");
                let _ = loaded_tx.send(());

                match trigger.run_on(&watched).await {
                    Ok(outcome) => debug!("Trigger on {address}: {outcome:?}"),
                    Err(e) => warn!("Trigger on {address} failed: {e:#}"),
                }
                return;
            }
        });

        let session = ChromiumSession { page, watcher };

        if let Err(message) = navigate(&session.page, &source_address).await {
            if let Err(e) = session.close().await {
                warn!("{e}");
            }
            return Err(ContextError::Navigation {
                address: source_address.to_string(),
                message,
            });
        }

        Ok((session, loaded_rx))
    }
}

async fn navigate(page: &Page, address: &Url) -> Result<(), String> {
    let response = page
        .execute(NavigateParams::new(address.as_str()))
        .await
        .map_err(|e| e.to_string())?;

    match response.result.error_text.clone() {
        Some(error_text) => Err(error_text),
        None => Ok(()),
    }
}

impl ContextSession for ChromiumSession {
    async fn close(self) -> Result<(), ContextError> {
        self.watcher.abort();
        self.page
            .clone()
            .close()
            .await
            .map_err(|e| ContextError::Close(e.to_string()))
    }
}
