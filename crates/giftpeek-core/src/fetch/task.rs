//! Run a blocking [`PageFetcher`] off the async executor.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use url::Url;

use super::{FetchError, FetchedPage, PageFetcher};

/// Sets the abort token when dropped, so a caller that stops awaiting the
/// fetch also stops the transfer.
struct AbortOnDrop(Arc<AtomicBool>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Runs `fetcher.fetch(url)` in `spawn_blocking`.
///
/// Dropping the returned future before it completes requests an abort of the
/// underlying transfer; the blocking task then exits at its next progress
/// check.
pub async fn fetch_in_background(
    fetcher: Arc<dyn PageFetcher>,
    url: Url,
) -> Result<FetchedPage, FetchError> {
    let abort = Arc::new(AtomicBool::new(false));
    let _guard = AbortOnDrop(Arc::clone(&abort));

    tokio::task::spawn_blocking(move || fetcher.fetch(&url, &abort)).await?
}
