//! `giftpeek image <url> -o <path>` – save the preview image of a link.

use anyhow::{Context, Result};
use giftpeek_core::LinkPreviewResolver;
use std::path::Path;

use super::parse_link;

pub async fn run_image(resolver: &LinkPreviewResolver, url: &str, output: &Path) -> Result<()> {
    let link = parse_link(url)?;
    let image = resolver
        .resolve_image(&link)
        .await
        .with_context(|| format!("no preview image available for {link}"))?;

    tokio::fs::write(output, &image.bytes)
        .await
        .with_context(|| format!("write image: {}", output.display()))?;
    println!(
        "Saved {} bytes ({}) from {} to {}",
        image.bytes.len(),
        image.content_type.as_deref().unwrap_or("unknown type"),
        image.url,
        output.display()
    );
    Ok(())
}
