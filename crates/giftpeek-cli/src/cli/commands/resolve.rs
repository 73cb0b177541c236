//! `giftpeek resolve <url>...` – print the preview image of each link.

use anyhow::Result;
use giftpeek_core::LinkPreviewResolver;

use super::{format_line, parse_link, resolve_bounded};

pub async fn run_resolve(
    resolver: &LinkPreviewResolver,
    urls: &[String],
    jobs: usize,
) -> Result<()> {
    // Reject bad arguments before any network work.
    let links = urls
        .iter()
        .map(|raw| parse_link(raw))
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(count = links.len(), jobs, "resolving links");

    let results = resolve_bounded(
        resolver,
        links.iter().cloned().enumerate().collect(),
        links.len(),
        jobs,
    )
    .await?;
    for (link, result) in links.iter().zip(&results) {
        println!("{}", format_line(link.as_str(), result));
    }
    Ok(())
}
