use thiserror::Error;

/// Errors surfaced to the user by a download run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    /// Nothing to download; a run never starts
    #[error("No items found on the listing page")]
    NoItemsFound,

    /// Another run holds the lock; the request was ignored
    #[error("A download run is already in progress")]
    AlreadyRunning,

    /// A fault outside the per-item boundary ended the run early
    #[error("Download run aborted after {completed}/{total} items: {detail}")]
    Unrecoverable {
        completed: usize,
        total: usize,
        detail: String,
    },
}

/// Convenience alias for Result with `DownloadError`
pub type DownloadResult<T> = Result<T, DownloadError>;
