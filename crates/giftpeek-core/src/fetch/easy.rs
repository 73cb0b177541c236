//! libcurl-backed [`PageFetcher`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use url::Url;

use super::{FetchError, FetchedPage, PageFetcher};
use crate::config::PreviewConfig;

/// Curl options derived from [`PreviewConfig`]. One fresh `Easy` handle per fetch.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    user_agent: String,
    timeout: Duration,
    connect_timeout: Duration,
    max_redirects: u32,
    max_body_bytes: usize,
}

impl CurlFetcher {
    pub fn new(cfg: &PreviewConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            timeout: cfg.timeout(),
            connect_timeout: cfg.connect_timeout(),
            max_redirects: cfg.max_redirects,
            max_body_bytes: cfg.max_body_bytes.max(1),
        }
    }
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::new(&PreviewConfig::default())
    }
}

impl PageFetcher for CurlFetcher {
    fn fetch(&self, url: &Url, abort: &AtomicBool) -> Result<FetchedPage, FetchError> {
        let mut body: Vec<u8> = Vec::new();
        let mut truncated = false;
        let cap = self.max_body_bytes;

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str())?;
        easy.get(true)?;
        easy.useragent(&self.user_agent)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.max_redirects)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        // Let curl decode gzip/deflate/br bodies; servers often compress HTML.
        easy.accept_encoding("")?;
        easy.progress(true)?;

        let perform_result = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                let room = cap.saturating_sub(body.len());
                if data.len() > room {
                    body.extend_from_slice(&data[..room]);
                    truncated = true;
                    return Ok(0); // stop transfer
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.progress_function(|_, _, _, _| !abort.load(Ordering::Relaxed))?;
            transfer.perform()
        };

        if let Err(e) = perform_result {
            if e.is_aborted_by_callback() || abort.load(Ordering::Relaxed) {
                return Err(FetchError::Aborted);
            }
            // Hitting the size cap surfaces as a write error; keep the prefix.
            if !(e.is_write_error() && truncated) {
                return Err(FetchError::Curl(e));
            }
            tracing::debug!(url = %url, cap, "response body truncated at size cap");
        }

        let status = easy.response_code()?;
        let content_type = easy.content_type()?.map(str::to_string);

        Ok(FetchedPage {
            status,
            content_type,
            body,
            truncated,
        })
    }
}
