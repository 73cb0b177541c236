//! CLI command handlers. Each command is in its own file.

mod image;
mod resolve;
mod suggestions;

pub use image::run_image;
pub use resolve::run_resolve;
pub use suggestions::run_suggestions;
#[cfg(test)]
pub(crate) use suggestions::resolve_all;

use anyhow::{Context, Result};
use giftpeek_core::{LinkPreviewResolver, PreviewResult};
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;

/// Parse a command-line link; only absolute http(s) URLs are accepted.
pub(crate) fn parse_link(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid URL: {raw}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("unsupported URL scheme '{}': {raw}", url.scheme());
    }
    Ok(url)
}

/// Resolve `(slot, link)` pairs, at most `jobs` at a time.
///
/// Returns `slots` results in slot order; slots without a link stay `NotAvailable`.
pub(crate) async fn resolve_bounded(
    resolver: &LinkPreviewResolver,
    links: Vec<(usize, Url)>,
    slots: usize,
    jobs: usize,
) -> Result<Vec<PreviewResult>> {
    let permits = Arc::new(Semaphore::new(jobs.max(1)));
    let mut tasks = tokio::task::JoinSet::new();
    let mut results = vec![PreviewResult::NotAvailable; slots];

    for (index, link) in links {
        let resolver = resolver.clone();
        let permits = Arc::clone(&permits);
        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await?;
            anyhow::Ok((index, resolver.resolve(&link).await))
        });
    }

    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined??;
        results[index] = result;
    }
    Ok(results)
}

/// One output line: `<label>\t<image-url>` or `<label>\t-`.
pub(crate) fn format_line(label: &str, result: &PreviewResult) -> String {
    match result.image_url() {
        Some(image) => format!("{label}\t{image}"),
        None => format!("{label}\t-"),
    }
}
