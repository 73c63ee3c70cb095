//! UI states and the fixed texts shown for them.

use crate::transport::UploadRequest;

/// Shown when the form is submitted with no file picked.
pub const MSG_NO_FILE: &str = "Please select a file.";
/// Shown while the request is pending.
pub const MSG_PROCESSING: &str = "Processing file, please wait...";
/// Shown once the download link is ready.
pub const MSG_SUCCESS: &str = "File processed successfully!";
/// Prepended to server and transport failure messages.
pub const ERROR_PREFIX: &str = "Error: ";

/// What the form currently displays. Exactly one at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UiStatus {
    #[default]
    Idle,
    Processing,
    /// Download link visible.
    Ready {
        href: String,
        filename: String,
        /// Attachment name from the server's Content-Disposition, if any.
        server_filename: Option<String>,
    },
    /// Error region populated with `error` (validation text, or prefixed failure).
    Failed { error: String },
}

impl UiStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, UiStatus::Ready { .. })
    }
}

/// Result of the synchronous part of a submit.
#[derive(Debug)]
pub enum Submission<F> {
    /// No file picked; the validation error is shown and nothing was sent.
    Invalid,
    /// A previous upload has not settled; the form was left untouched.
    Busy,
    /// The request is ready to send; pass it to `complete`.
    Started(UploadRequest<F>),
}
