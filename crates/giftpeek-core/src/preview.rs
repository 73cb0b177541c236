//! Result types handed to the rendering layer.

use url::Url;

/// Outcome of resolving a link preview. Every failure collapses to `NotAvailable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewResult {
    /// Absolute URL of the page's `og:image`.
    ImageReference(Url),
    NotAvailable,
}

impl PreviewResult {
    pub fn image_url(&self) -> Option<&Url> {
        match self {
            PreviewResult::ImageReference(url) => Some(url),
            PreviewResult::NotAvailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, PreviewResult::ImageReference(_))
    }
}

impl From<Option<Url>> for PreviewResult {
    fn from(url: Option<Url>) -> Self {
        url.map_or(PreviewResult::NotAvailable, PreviewResult::ImageReference)
    }
}

/// Raw, undecoded image returned by [`crate::image::fetch_image`].
/// Turning the bytes into a drawable image is left to the caller.
#[derive(Debug, Clone)]
pub struct ImageResource {
    pub url: Url,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}
