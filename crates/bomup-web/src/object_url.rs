//! Object URLs as download link targets.

use bomup_core::artifact::DownloadStore;
use web_sys::{Blob, Url};

use crate::fetch::js_error_message;

/// Hands out `blob:` URLs and revokes them on release.
#[derive(Debug, Default)]
pub struct BlobUrlStore {
    live: Vec<String>,
}

impl BlobUrlStore {
    /// Number of URLs not yet revoked.
    pub fn live(&self) -> usize {
        self.live.len()
    }
}

impl DownloadStore for BlobUrlStore {
    type Body = Blob;

    fn publish(&mut self, body: Blob) -> anyhow::Result<String> {
        let href = Url::create_object_url_with_blob(&body)
            .map_err(|err| anyhow::anyhow!("createObjectURL: {}", js_error_message(&err)))?;
        self.live.push(href.clone());
        Ok(href)
    }

    fn release(&mut self, href: &str) {
        let Some(pos) = self.live.iter().position(|h| h == href) else {
            return;
        };
        self.live.swap_remove(pos);
        if let Err(err) = Url::revoke_object_url(href) {
            tracing::warn!("revokeObjectURL({}): {}", href, js_error_message(&err));
        }
    }
}
