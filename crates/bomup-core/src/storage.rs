//! Saving a published download to its final location.
//!
//! The copy goes to `<final>.part` first and is renamed into place once
//! synced, so an interrupted save never leaves a truncated file under the
//! final name.

use anyhow::{Context, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `bom.xlsx` → `bom.xlsx.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Copy `source` to `final_path` via a synced `.part` file and a rename.
/// Overwrites an existing file at `final_path`. Returns the bytes written.
pub fn save_download(source: &Path, final_path: &Path) -> Result<u64> {
    if let Some(parent) = final_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }

    let part = temp_path(final_path);
    let written = (|| -> Result<u64> {
        let mut src =
            File::open(source).with_context(|| format!("open {}", source.display()))?;
        let mut dst =
            File::create(&part).with_context(|| format!("create {}", part.display()))?;
        let n = io::copy(&mut src, &mut dst)
            .with_context(|| format!("copy into {}", part.display()))?;
        dst.sync_all().context("sync saved download")?;
        Ok(n)
    })();

    let written = match written {
        Ok(n) => n,
        Err(e) => {
            let _ = std::fs::remove_file(&part);
            return Err(e);
        }
    };

    std::fs::rename(&part, final_path).with_context(|| {
        format!("failed to rename {} to {}", part.display(), final_path.display())
    })?;
    tracing::debug!(path = %final_path.display(), bytes = written, "saved download");
    Ok(written)
}
