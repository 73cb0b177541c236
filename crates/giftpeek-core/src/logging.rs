//! Tracing setup for giftpeek.
//!
//! Resolution never surfaces errors to callers, so the log is where failures
//! show up: fetch errors and timeouts at `warn`, non-success statuses at
//! `warn`, resolved `og:image` references and charset fallbacks at `debug`,
//! cache hits at `trace`, batch summaries from the CLI at `info`.
//!
//! Events go to `$XDG_STATE_HOME/giftpeek/giftpeek.log`; the CLI falls back to
//! stderr when that file cannot be opened. `RUST_LOG` overrides the filter.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,giftpeek_core=debug,giftpeek_cli=debug";

const LOG_FILE: &str = "giftpeek.log";

/// Log sink handed out per event; stderr when the file handle can't be cloned.
enum PreviewLogSink {
    File(File),
    Stderr,
}

impl io::Write for PreviewLogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            PreviewLogSink::File(f) => f.write(buf),
            PreviewLogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            PreviewLogSink::File(f) => f.flush(),
            PreviewLogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct LogFile(File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = PreviewLogSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(PreviewLogSink::File)
            .unwrap_or(PreviewLogSink::Stderr)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `$XDG_STATE_HOME/giftpeek/giftpeek.log`.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("giftpeek")?;
    Ok(xdg_dirs.get_state_home().join(LOG_FILE))
}

fn open_log(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}

/// Send preview diagnostics to the giftpeek log file.
///
/// Errors if the state dir is unusable or a subscriber is already installed;
/// the caller then uses [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_path()?;
    let file = open_log(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(BoxMakeWriter::new(LogFile(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))?;

    tracing::info!(path = %path.display(), "giftpeek logging initialized");
    Ok(())
}

/// Log to stderr only. Never fails; a second init is ignored.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
