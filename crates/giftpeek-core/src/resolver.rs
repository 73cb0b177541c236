//! Link preview resolution: URL in, `og:image` reference (or nothing) out.
//!
//! Every failure (network error, timeout, bad status, no meta tag, unusable
//! image URL) collapses to [`PreviewResult::NotAvailable`]. Callers only learn
//! whether a preview exists; diagnostics go to the log.

use std::sync::Arc;

use url::Url;

use crate::cache::PreviewCache;
use crate::config::PreviewConfig;
use crate::decode::decode_body;
use crate::extract::extract_og_image;
use crate::fetch::{fetch_in_background, CurlFetcher, FetchError, FetchedPage, PageFetcher};
use crate::preview::PreviewResult;

/// Resolves links to preview images through a shared [`PreviewCache`].
///
/// Cheap to clone; clones share the cache and the fetcher.
#[derive(Clone)]
pub struct LinkPreviewResolver {
    cache: Arc<PreviewCache>,
    fetcher: Arc<dyn PageFetcher>,
}

impl LinkPreviewResolver {
    pub fn new(cache: Arc<PreviewCache>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { cache, fetcher }
    }

    /// Resolver backed by libcurl with timeouts and User-Agent from `cfg`.
    pub fn from_config(cfg: &PreviewConfig, cache: Arc<PreviewCache>) -> Self {
        Self::new(cache, Arc::new(CurlFetcher::new(cfg)))
    }

    pub fn cache(&self) -> &Arc<PreviewCache> {
        &self.cache
    }

    pub(crate) fn fetcher(&self) -> Arc<dyn PageFetcher> {
        Arc::clone(&self.fetcher)
    }

    /// Cached result for `url` without touching the network.
    pub fn cached(&self, url: &Url) -> Option<PreviewResult> {
        self.cache.get(url)
    }

    /// Resolve `url` to its preview image.
    ///
    /// A cached result (positive or negative) is returned without network
    /// access. Otherwise one GET is issued and its outcome is cached. Concurrent
    /// calls for the same uncached URL may each fetch; the first stored result
    /// is what all of them return. Dropping the future cancels the fetch and
    /// leaves the cache untouched.
    pub async fn resolve(&self, url: &Url) -> PreviewResult {
        if let Some(hit) = self.cache.get(url) {
            tracing::trace!(url = %url, "preview cache hit");
            return hit;
        }

        let result = match self.fetch_preview(url).await {
            Some(result) => result,
            None => return PreviewResult::NotAvailable,
        };
        self.cache.insert(url.clone(), result)
    }

    /// Fetch and classify. `None` means the fetch was aborted and nothing
    /// should be cached.
    async fn fetch_preview(&self, url: &Url) -> Option<PreviewResult> {
        if !matches!(url.scheme(), "http" | "https") {
            tracing::debug!(url = %url, "not an http(s) link; no preview");
            return Some(PreviewResult::NotAvailable);
        }

        match fetch_in_background(self.fetcher(), url.clone()).await {
            Ok(page) => Some(preview_from_page(url, &page)),
            Err(FetchError::Aborted) => {
                tracing::debug!(url = %url, "preview fetch aborted");
                None
            }
            Err(e) => {
                if e.is_timeout() {
                    tracing::warn!(url = %url, "preview fetch timed out");
                } else {
                    tracing::warn!(url = %url, error = %e, "preview fetch failed");
                }
                Some(PreviewResult::NotAvailable)
            }
        }
    }
}

impl std::fmt::Debug for LinkPreviewResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkPreviewResolver")
            .field("cached_entries", &self.cache.len())
            .finish_non_exhaustive()
    }
}

/// Classify a fetched page: status check, body decoding, `og:image` lookup.
/// Relative image references are resolved against `request_url`.
pub fn preview_from_page(request_url: &Url, page: &FetchedPage) -> PreviewResult {
    if !page.is_success() {
        tracing::warn!(url = %request_url, status = page.status, "invalid HTTP response");
        return PreviewResult::NotAvailable;
    }

    let html = decode_body(&page.body, page.content_type.as_deref());
    match extract_og_image(&html, request_url) {
        Some(image) => {
            tracing::debug!(url = %request_url, image = %image, "resolved og:image");
            PreviewResult::ImageReference(image)
        }
        None => {
            tracing::debug!(url = %request_url, "no Open Graph image found");
            PreviewResult::NotAvailable
        }
    }
}
