//! Download the bytes behind a resolved preview image.
//!
//! Bytes are returned undecoded; the rendering layer owns decoding and any
//! in-memory image caching. Failures collapse to `None`, like page resolution.

use std::sync::Arc;

use url::Url;

use crate::fetch::{fetch_in_background, FetchedPage, PageFetcher};
use crate::preview::{ImageResource, PreviewResult};
use crate::resolver::LinkPreviewResolver;

/// GET `url` and return its body as an [`ImageResource`].
///
/// Fails (returns `None`) for non-http(s) URLs, transport errors, statuses
/// outside `[200, 400)`, empty bodies, and bodies cut off at the size cap.
pub async fn fetch_image(fetcher: Arc<dyn PageFetcher>, url: &Url) -> Option<ImageResource> {
    if !matches!(url.scheme(), "http" | "https") {
        tracing::debug!(url = %url, "not an http(s) image; skipping");
        return None;
    }
    match fetch_in_background(fetcher, url.clone()).await {
        Ok(page) => image_from_page(url, page),
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "image fetch failed");
            None
        }
    }
}

fn image_from_page(url: &Url, page: FetchedPage) -> Option<ImageResource> {
    if !page.is_success() {
        tracing::warn!(url = %url, status = page.status, "invalid HTTP response for image");
        return None;
    }
    if page.truncated || page.body.is_empty() {
        tracing::debug!(
            url = %url,
            truncated = page.truncated,
            "image body unusable"
        );
        return None;
    }
    Some(ImageResource {
        url: url.clone(),
        content_type: page.content_type,
        bytes: page.body,
    })
}

impl LinkPreviewResolver {
    /// Resolve `link` and download the preview image it points at.
    pub async fn resolve_image(&self, link: &Url) -> Option<ImageResource> {
        match self.resolve(link).await {
            PreviewResult::ImageReference(image_url) => {
                fetch_image(self.fetcher(), &image_url).await
            }
            PreviewResult::NotAvailable => None,
        }
    }
}
