//! `bomup view <table>` – fetch one table as HTML.

use anyhow::{Context, Result};
use bomup_core::catalog;
use bomup_core::config::BomupConfig;
use bomup_core::transport::HttpOptions;
use std::path::Path;

pub async fn run_view(cfg: &BomupConfig, table: &str, out: Option<&Path>) -> Result<()> {
    let html = catalog::view_table(&cfg.server_url, table, HttpOptions::from_config(cfg)).await?;
    match out {
        Some(path) => {
            std::fs::write(path, &html).with_context(|| format!("write {}", path.display()))?;
            println!("Wrote {} ({} bytes)", path.display(), html.len());
        }
        None => println!("{html}"),
    }
    Ok(())
}
