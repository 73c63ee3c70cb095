//! Browsing the tables the processing server built from earlier uploads.
//!
//! `GET /list-tables` returns a JSON array of table names and
//! `GET /view-data/<table>` returns the table rendered as HTML.

use crate::config::endpoint_url;
use crate::transport::{self, HttpOptions, RawResponse};
use anyhow::{Context, Result};

/// Path listing the server's tables.
pub const LIST_TABLES_PATH: &str = "/list-tables";
/// Path prefix for viewing one table.
pub const VIEW_DATA_PATH: &str = "/view-data/";

fn checked(url: &str, response: RawResponse) -> Result<RawResponse> {
    if !response.is_success() {
        anyhow::bail!(
            "GET {} returned HTTP {}: {}",
            url,
            response.status,
            response.text().trim()
        );
    }
    Ok(response)
}

async fn fetch(url: String, options: HttpOptions) -> Result<RawResponse> {
    let fetched = {
        let url = url.clone();
        tokio::task::spawn_blocking(move || transport::get(&url, options)).await
    };
    let response = fetched
        .context("catalog request task failed")?
        .with_context(|| format!("GET {url} failed"))?;
    checked(&url, response)
}

/// URL of the view endpoint for `table`, encoded as a single path segment.
pub fn view_url(server_url: &str, table: &str) -> Result<String> {
    let mut url = url::Url::parse(&endpoint_url(server_url, VIEW_DATA_PATH)?)?;
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("server URL cannot carry a path: {server_url}"))?
        .pop_if_empty()
        .push(table);
    Ok(url.to_string())
}

/// Names of the tables on the server.
pub async fn list_tables(server_url: &str, options: HttpOptions) -> Result<Vec<String>> {
    let url = endpoint_url(server_url, LIST_TABLES_PATH)?;
    let response = fetch(url.clone(), options).await?;
    let tables: Vec<String> = serde_json::from_slice(&response.body)
        .with_context(|| format!("parse table list from {url}"))?;
    tracing::debug!(count = tables.len(), "listed tables");
    Ok(tables)
}

/// HTML rendering of one table.
pub async fn view_table(server_url: &str, table: &str, options: HttpOptions) -> Result<String> {
    if table.trim().is_empty() {
        anyhow::bail!("table name is empty");
    }
    let url = view_url(server_url, table)?;
    let response = fetch(url, options).await?;
    Ok(response.text())
}
