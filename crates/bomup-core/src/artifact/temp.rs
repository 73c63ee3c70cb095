//! Native download store: one file per published body in a private temp dir.

use super::DownloadStore;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Publishes bodies as files under a private temp directory; hrefs are `file://` URLs.
/// Dropping the store removes the directory and anything still in it.
#[derive(Debug)]
pub struct TempDirStore {
    dir: TempDir,
    entries: HashMap<String, PathBuf>,
}

impl TempDirStore {
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("bomup-")
            .tempdir()
            .context("create download store directory")?;
        Ok(Self {
            dir,
            entries: HashMap::new(),
        })
    }

    /// Directory holding published files.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Local path behind a live href.
    pub fn resolve(&self, href: &str) -> Option<&Path> {
        self.entries.get(href).map(PathBuf::as_path)
    }

    /// Number of published, unreleased resources.
    pub fn live(&self) -> usize {
        self.entries.len()
    }
}

impl DownloadStore for TempDirStore {
    type Body = Vec<u8>;

    fn publish(&mut self, body: Vec<u8>) -> Result<String> {
        let mut file = tempfile::Builder::new()
            .prefix("download-")
            .tempfile_in(self.dir.path())
            .context("create download file")?;
        file.write_all(&body).context("write download file")?;
        file.flush()?;
        let (_, path) = file.keep().context("keep download file")?;

        let href = url::Url::from_file_path(&path)
            .map_err(|_| anyhow::anyhow!("not an absolute path: {}", path.display()))?
            .to_string();
        tracing::debug!(href = %href, bytes = body.len(), "published download");
        self.entries.insert(href.clone(), path);
        Ok(href)
    }

    fn release(&mut self, href: &str) {
        let Some(path) = self.entries.remove(href) else {
            return;
        };
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::warn!("release {}: {}", path.display(), e);
        }
    }
}
