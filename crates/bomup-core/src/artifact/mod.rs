//! Download resources: where a delivered body lives while the link points at it.
//!
//! The controller publishes a body right before revealing the link and
//! releases it when the next upload begins, so at most one resource per
//! controller is alive at any time.

#[cfg(not(target_arch = "wasm32"))]
mod temp;

#[cfg(not(target_arch = "wasm32"))]
pub use temp::TempDirStore;

/// Turns delivered bodies into link targets and releases them again.
pub trait DownloadStore {
    type Body;

    /// Make `body` reachable and return the href the download link should use.
    fn publish(&mut self, body: Self::Body) -> anyhow::Result<String>;

    /// Release the resource behind `href`. Unknown hrefs are ignored.
    fn release(&mut self, href: &str);
}
