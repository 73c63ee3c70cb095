//! User-visible upload failures.

use thiserror::Error;

/// Why an accepted submission did not produce a download.
///
/// `Display` is the bare message; the controller adds the `Error: ` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadFailure {
    /// The server answered with a non-2xx status; its body is the message.
    #[error("{text}")]
    Server { status: u32, text: String },
    /// The request could not complete (connection refused, DNS, timeout...).
    #[error("{0}")]
    Transport(String),
    /// The body arrived but could not be exposed as a download.
    #[error("{0}")]
    Publish(String),
}

impl UploadFailure {
    pub fn status(&self) -> Option<u32> {
        match self {
            UploadFailure::Server { status, .. } => Some(*status),
            UploadFailure::Transport(_) | UploadFailure::Publish(_) => None,
        }
    }
}
