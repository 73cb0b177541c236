//! `giftpeek suggestions <file>` – resolve previews for exported gift suggestions.

use anyhow::Result;
use giftpeek_core::suggestion::{load_suggestions, GiftSuggestion};
use giftpeek_core::{LinkPreviewResolver, PreviewResult};
use std::path::Path;

use super::{format_line, resolve_bounded};

pub async fn run_suggestions(
    resolver: &LinkPreviewResolver,
    path: &Path,
    jobs: usize,
) -> Result<()> {
    let suggestions = load_suggestions(path)?;
    if suggestions.is_empty() {
        println!("No gift suggestions in {}.", path.display());
        return Ok(());
    }
    tracing::info!(
        count = suggestions.len(),
        jobs,
        "resolving previews for gift suggestions"
    );

    let results = resolve_all(resolver, &suggestions, jobs).await?;
    let found = results.iter().filter(|r| r.is_available()).count();
    for (suggestion, result) in suggestions.iter().zip(&results) {
        println!("{}", format_line(&suggestion.title, result));
    }
    tracing::info!(found, total = results.len(), "suggestion previews resolved");
    Ok(())
}

/// Resolve every suggestion's preview link, at most `jobs` at a time.
/// Results are in input order; suggestions without a usable link are
/// `NotAvailable`.
pub(crate) async fn resolve_all(
    resolver: &LinkPreviewResolver,
    suggestions: &[GiftSuggestion],
    jobs: usize,
) -> Result<Vec<PreviewResult>> {
    let links = suggestions
        .iter()
        .enumerate()
        .filter_map(|(index, suggestion)| match suggestion.preview_link() {
            Some(link) => Some((index, link)),
            None => {
                tracing::debug!(title = %suggestion.title, "suggestion has no usable link");
                None
            }
        })
        .collect();
    resolve_bounded(resolver, links, suggestions.len(), jobs).await
}
