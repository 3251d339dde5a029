//! Control surface rendered inside the listing tab
//!
//! The panel script adds the start button and the status box to the page.
//! Button presses and confirmation answers come back through a DevTools
//! binding; a dispatcher task routes them to the start-request channel or to
//! the pending confirmation.

use anyhow::{Context, Result};
use chromiumoxide::page::Page;
use chromiumoxide_cdp::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide_cdp::cdp::js_protocol::runtime::{AddBindingParams, EventBindingCalled};
use futures::StreamExt;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::ControlSurface;
use super::js_scripts::{alert_script, confirm_script, panel_script, status_script};
use crate::i18n::{MessageKey, Messages};
use crate::utils::CONTROL_BINDING_NAME;

type PendingConfirm = Arc<Mutex<Option<oneshot::Sender<bool>>>>;

pub struct PageControlSurface {
    page: Page,
    pending_confirm: PendingConfirm,
    dispatcher: JoinHandle<()>,
}

impl Drop for PageControlSurface {
    fn drop(&mut self) {
        self.dispatcher.abort();
    }
}

impl PageControlSurface {
    /// Install the panel into `page`
    ///
    /// Returns the surface and a receiver yielding one `()` per button press.
    /// The receiver closes when the tab goes away.
    pub async fn install(
        page: Page,
        messages: &Messages,
    ) -> Result<(Self, mpsc::UnboundedReceiver<()>)> {
        page.execute(AddBindingParams::new(CONTROL_BINDING_NAME))
            .await
            .context("Failed to register control binding")?;

        let mut signals = page
            .event_listener::<EventBindingCalled>()
            .await
            .context("Failed to subscribe to control binding")?;

        let script = panel_script(
            &messages.text(MessageKey::ButtonText, &[]),
            CONTROL_BINDING_NAME,
        );

        // Re-installed on every reload of the listing tab
        let on_new_document = AddScriptToEvaluateOnNewDocumentParams::builder()
            .source(script.clone())
            .build()
            .map_err(anyhow::Error::msg)?;
        page.execute(on_new_document)
            .await
            .context("Failed to register panel script")?;
        page.evaluate(script.as_str())
            .await
            .context("Failed to install panel")?;

        let (start_tx, start_rx) = mpsc::unbounded_channel();
        let pending_confirm: PendingConfirm = Arc::new(Mutex::new(None));
        let pending = Arc::clone(&pending_confirm);

        let dispatcher = tokio::spawn(async move {
            while let Some(event) = signals.next().await {
                if event.name != CONTROL_BINDING_NAME {
                    continue;
                }
                match event.payload.as_str() {
                    "start" => {
                        if start_tx.send(()).is_err() {
                            break;
                        }
                    }
                    answer @ ("confirm" | "cancel") => {
                        if let Some(reply) = pending.lock().take() {
                            let _ = reply.send(answer == "confirm");
                        } else {
                            debug!("Confirmation answer without a pending question");
                        }
                    }
                    other => debug!("Ignoring unknown panel signal {other:?}"),
                }
            }
            // Unblocks a confirmation that can no longer be answered
            pending.lock().take();
            debug!("Panel signal stream ended");
        });

        info!("Download panel installed");
        Ok((
            Self {
                page,
                pending_confirm,
                dispatcher,
            },
            start_rx,
        ))
    }

    async fn run_script(&self, script: String) {
        if let Err(e) = self.page.evaluate(script.as_str()).await {
            warn!("Panel script failed: {e}");
        }
    }
}

impl ControlSurface for PageControlSurface {
    async fn confirm(&self, message: &str) -> bool {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.pending_confirm.lock().replace(reply_tx).is_some() {
            debug!("Replacing an unanswered confirmation");
        }

        self.run_script(confirm_script(message, CONTROL_BINDING_NAME))
            .await;

        // A closed tab counts as "no"
        reply_rx.await.unwrap_or(false)
    }

    async fn alert(&self, message: &str) {
        self.run_script(alert_script(message)).await;
    }

    async fn show_status(&self, text: &str) {
        self.run_script(status_script(Some(text))).await;
    }

    async fn hide_status(&self) {
        self.run_script(status_script(None)).await;
    }
}
