//! HTTP GET of preview pages and images.
//!
//! The resolver only depends on the [`PageFetcher`] trait; [`CurlFetcher`]
//! is the production implementation on top of libcurl. Fetches are blocking
//! and are expected to run inside `spawn_blocking`.

mod easy;
mod task;

pub use easy::CurlFetcher;
pub use task::fetch_in_background;

use std::sync::atomic::AtomicBool;
use url::Url;

/// Raw response of a single GET after redirects were followed.
#[derive(Debug, Clone, Default)]
pub struct FetchedPage {
    /// Final HTTP status code.
    pub status: u32,
    /// `Content-Type` of the final response, if any.
    pub content_type: Option<String>,
    pub body: Vec<u8>,
    /// True if the body was cut off at the configured size cap.
    pub truncated: bool,
}

impl FetchedPage {
    /// Any status in `[200, 400)` counts as success.
    pub fn is_success(&self) -> bool {
        is_success_status(self.status)
    }
}

pub fn is_success_status(status: u32) -> bool {
    (200..400).contains(&status)
}

/// Transport-level failure of a fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, TLS, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// The caller lost interest and the transfer was stopped.
    #[error("fetch aborted")]
    Aborted,
    /// The blocking fetch task panicked or was cancelled by the runtime.
    #[error("fetch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Curl(e) if e.is_operation_timedout())
    }
}

/// Blocking GET of a URL. `abort` is polled during the transfer; once it is
/// set the implementation should stop and return [`FetchError::Aborted`].
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &Url, abort: &AtomicBool) -> Result<FetchedPage, FetchError>;
}
