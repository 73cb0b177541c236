//! CLI for giftpeek link previews.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use giftpeek_core::{config, LinkPreviewResolver, PreviewCache};
use std::path::PathBuf;
use std::sync::Arc;

use commands::{run_image, run_resolve, run_suggestions};

/// Top-level CLI for giftpeek.
#[derive(Debug, Parser)]
#[command(name = "giftpeek")]
#[command(about = "giftpeek: preview images for gift suggestion links", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve the og:image preview of one or more links.
    Resolve {
        /// Absolute HTTP/HTTPS links.
        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,
        /// Resolve up to N links concurrently (default from config, else 4).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// Resolve previews for gift suggestions exported as a JSON array.
    Suggestions {
        /// Path to the JSON file.
        path: PathBuf,
        /// Resolve up to N links concurrently (default from config, else 4).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// Download the preview image of a link.
    Image {
        /// Absolute HTTP/HTTPS link whose preview to fetch.
        url: String,
        /// Where to write the image bytes.
        #[arg(short, long, value_name = "PATH")]
        output: PathBuf,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        // One cache for the whole invocation.
        let resolver = LinkPreviewResolver::from_config(&cfg, Arc::new(PreviewCache::new()));

        match cli.command {
            CliCommand::Resolve { urls, jobs } => {
                let jobs = jobs.unwrap_or_else(|| cfg.concurrency());
                run_resolve(&resolver, &urls, jobs).await?;
            }
            CliCommand::Suggestions { path, jobs } => {
                let jobs = jobs.unwrap_or_else(|| cfg.concurrency());
                run_suggestions(&resolver, &path, jobs).await?;
            }
            CliCommand::Image { url, output } => run_image(&resolver, &url, &output).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
