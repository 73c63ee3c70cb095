//! `bomup upload <file>` – submit a spreadsheet and save the processed result.

use anyhow::{Context, Result};
use bomup_core::artifact::TempDirStore;
use bomup_core::config::BomupConfig;
use bomup_core::controller::{UiStatus, UploadController};
use bomup_core::naming;
use bomup_core::storage;
use bomup_core::transport::CurlTransport;
use bomup_core::view::{DirectSubmit, LocalFile};
use std::path::Path;

use crate::cli::terminal::TerminalView;
use crate::cli::Reported;

pub async fn run_upload(
    cfg: &BomupConfig,
    file: Option<&Path>,
    out_dir: &Path,
    prefer_server_name: bool,
) -> Result<()> {
    let transport = CurlTransport::from_config(cfg)?;
    tracing::info!(url = transport.upload_url(), "uploading");
    let view = TerminalView::new(file.map(LocalFile::new));
    let mut ctl = UploadController::new(view, transport, TempDirStore::new()?);

    let server_filename = match ctl.submit(&DirectSubmit).await {
        UiStatus::Ready {
            server_filename, ..
        } => server_filename,
        _ => {
            tracing::debug!(error = ctl.view().error(), "upload did not produce a download");
            return Err(Reported.into());
        }
    };

    // The terminal equivalent of clicking the download link.
    let (href, suggested) = ctl
        .view()
        .link()
        .context("download link not shown after a successful upload")?;
    let source = ctl
        .store()
        .resolve(href)
        .with_context(|| format!("no local file behind {href}"))?;
    let name = naming::save_name(suggested, server_filename.as_deref(), prefer_server_name);
    let dest = out_dir.join(name);

    let bytes = storage::save_download(source, &dest)?;
    println!("Saved {} ({} bytes)", dest.display(), bytes);

    ctl.release();
    Ok(())
}
