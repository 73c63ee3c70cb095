//! The HTTP boundary: one multipart POST, three possible outcomes.
//!
//! A transport performs exactly one attempt per request and never retries.
//! Success carries the response body untouched; a non-2xx status carries the
//! body as text; a request that could not complete carries the error text.

mod error;
mod parse;

#[cfg(not(target_arch = "wasm32"))]
mod http;

pub use error::UploadFailure;
pub use parse::parse_headers;

#[cfg(not(target_arch = "wasm32"))]
pub use self::http::{get, CurlTransport, HttpOptions, RawResponse, TransportError};

use crate::view::PickedFile;
use async_trait::async_trait;

/// Multipart field name the processing server reads the upload from.
pub const FILE_FIELD: &str = "file";

/// One-shot multipart payload: a single part holding the picked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest<F> {
    pub field_name: &'static str,
    pub file: F,
}

impl<F: PickedFile> UploadRequest<F> {
    pub fn new(file: F) -> Self {
        Self {
            field_name: FILE_FIELD,
            file,
        }
    }
}

/// Response metadata kept alongside a delivered body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    pub status: u32,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub content_disposition: Option<String>,
}

impl ResponseMeta {
    /// Attachment name the server chose, if it sent one.
    pub fn server_filename(&self) -> Option<String> {
        self.content_disposition
            .as_deref()
            .and_then(crate::naming::parse_content_disposition_filename)
    }
}

/// What came back from a single upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome<B> {
    /// 2xx: the processed file, opaque.
    Delivered { body: B, meta: ResponseMeta },
    /// Non-2xx: the response body read as text.
    Rejected { status: u32, text: String },
    /// The request never produced a response.
    Unreachable { message: String },
}

impl<B> UploadOutcome<B> {
    pub fn into_result(self) -> Result<(B, ResponseMeta), UploadFailure> {
        match self {
            UploadOutcome::Delivered { body, meta } => Ok((body, meta)),
            UploadOutcome::Rejected { status, text } => Err(UploadFailure::Server { status, text }),
            UploadOutcome::Unreachable { message } => Err(UploadFailure::Transport(message)),
        }
    }
}

/// Sends an upload request and reports the outcome.
///
/// Futures are not required to be `Send`: browser transports hold JS values
/// across awaits.
#[async_trait(?Send)]
pub trait UploadTransport {
    type File: PickedFile;
    type Body;

    async fn post(&self, request: UploadRequest<Self::File>) -> UploadOutcome<Self::Body>;
}

/// MIME type sent for the file part, from the filename extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xlsm" => "application/vnd.ms-excel.sheet.macroEnabled.12",
        "xls" => "application/vnd.ms-excel",
        "csv" => "text/csv",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::LocalFile;

    #[test]
    fn request_uses_file_field() {
        let req = UploadRequest::new(LocalFile::new("bom.xlsx"));
        assert_eq!(req.field_name, "file");
        assert_eq!(req.file.name, "bom.xlsx");
    }

    #[test]
    fn outcome_into_result() {
        let ok: UploadOutcome<Vec<u8>> = UploadOutcome::Delivered {
            body: vec![1, 2, 3],
            meta: ResponseMeta::default(),
        };
        assert_eq!(ok.into_result().unwrap().0, vec![1, 2, 3]);

        let rejected: UploadOutcome<Vec<u8>> = UploadOutcome::Rejected {
            status: 400,
            text: "No selected file".into(),
        };
        assert_eq!(
            rejected.into_result().unwrap_err(),
            UploadFailure::Server {
                status: 400,
                text: "No selected file".into()
            }
        );

        let down: UploadOutcome<Vec<u8>> = UploadOutcome::Unreachable {
            message: "connection refused".into(),
        };
        assert_eq!(
            down.into_result().unwrap_err(),
            UploadFailure::Transport("connection refused".into())
        );
    }

    #[test]
    fn server_filename_from_disposition() {
        let meta = ResponseMeta {
            status: 200,
            content_disposition: Some("attachment; filename=bom_updated.xlsx".into()),
            ..ResponseMeta::default()
        };
        assert_eq!(meta.server_filename().as_deref(), Some("bom_updated.xlsx"));
        assert_eq!(ResponseMeta::default().server_filename(), None);
    }

    #[test]
    fn content_types() {
        assert_eq!(
            content_type_for("bom.XLSX"),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(content_type_for("list.csv"), "text/csv");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }
}
