//! Native log setup: `~/.local/state/bomup/bomup.log`, stderr when that is unusable.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,bomup=debug,bomup_core=debug";
const LOG_FILE_NAME: &str = "bomup.log";

/// Where log lines ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

/// Opens `dir/bomup.log` for appending, creating `dir` if needed.
pub fn open_log_file(dir: &Path) -> Result<(PathBuf, File)> {
    fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    let path = dir.join(LOG_FILE_NAME);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;
    Ok((path, file))
}

fn state_log_file() -> Result<(PathBuf, File)> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bomup")?;
    open_log_file(&xdg_dirs.get_state_home())
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
///
/// A read-only or missing state dir never stops the program: logging then
/// goes to stderr and the reason is logged there.
pub fn init_logging() -> LogTarget {
    let (target, writer, file_error) = match state_log_file() {
        Ok((path, file)) => (LogTarget::File(path), BoxMakeWriter::new(Arc::new(file)), None),
        Err(e) => (LogTarget::Stderr, BoxMakeWriter::new(std::io::stderr), Some(e)),
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .is_err()
    {
        // Someone else installed a subscriber first; theirs stays.
        return target;
    }

    match (&target, file_error) {
        (LogTarget::File(path), _) => tracing::info!("logging to {}", path.display()),
        (LogTarget::Stderr, Some(e)) => {
            tracing::warn!("file logging unavailable, using stderr: {:#}", e)
        }
        (LogTarget::Stderr, None) => {}
    }
    target
}
