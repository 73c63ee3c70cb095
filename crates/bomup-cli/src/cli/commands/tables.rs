//! `bomup tables` – list tables on the processing server.

use anyhow::Result;
use bomup_core::catalog;
use bomup_core::config::BomupConfig;
use bomup_core::transport::HttpOptions;

pub async fn run_tables(cfg: &BomupConfig) -> Result<()> {
    let tables = catalog::list_tables(&cfg.server_url, HttpOptions::from_config(cfg)).await?;
    if tables.is_empty() {
        println!("No tables on server.");
    } else {
        for t in tables {
            println!("{t}");
        }
    }
    Ok(())
}
