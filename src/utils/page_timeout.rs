//! Timeout wrapper for listing-tab operations
//!
//! Navigation and script evaluation on the listing tab have no deadline of
//! their own; a hung renderer would otherwise stall startup forever.

use anyhow::Result;
use std::future::Future;
use std::time::Duration;

/// Run `operation` under `limit`, naming it in the timeout error
pub async fn with_page_timeout<F, T>(operation: F, limit: Duration, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => Err(anyhow::anyhow!(
            "{operation_name} timeout after {} seconds",
            limit.as_secs()
        )),
    }
}
