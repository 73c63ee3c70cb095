//! Blocking curl transport for native builds.
//!
//! Each call builds one `Easy` handle, performs exactly one request and keeps
//! the whole body in memory. Async callers go through `CurlTransport`, which
//! moves the blocking work onto `spawn_blocking`.

use super::{
    content_type_for, parse_headers, ResponseMeta, UploadOutcome, UploadRequest, UploadTransport,
};
use crate::config::BomupConfig;
use crate::view::LocalFile;
use async_trait::async_trait;
use curl::easy::{Easy, Form, List};
use std::path::PathBuf;
use std::str;
use std::time::Duration;
use thiserror::Error;

/// Timeouts applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    /// None = the request may stay pending indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self::from_config(&BomupConfig::default())
    }
}

impl HttpOptions {
    pub fn from_config(cfg: &BomupConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: cfg.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Error from a request that never produced a usable response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Curl(#[from] curl::Error),
    #[error("multipart form: {0}")]
    Form(#[from] curl::FormError),
    #[error("cannot read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Status, header lines and body of a completed request.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u32,
    pub headers: Vec<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn meta(&self) -> ResponseMeta {
        parse_headers(self.status, &self.headers)
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    fn into_outcome(self) -> UploadOutcome<Vec<u8>> {
        if self.is_success() {
            let meta = self.meta();
            UploadOutcome::Delivered {
                body: self.body,
                meta,
            }
        } else {
            UploadOutcome::Rejected {
                status: self.status,
                text: self.text(),
            }
        }
    }
}

fn configure(easy: &mut Easy, url: &str, options: HttpOptions) -> Result<(), TransportError> {
    easy.url(url)?;
    easy.connect_timeout(options.connect_timeout)?;
    if let Some(timeout) = options.timeout {
        easy.timeout(timeout)?;
    }
    Ok(())
}

fn perform(mut easy: Easy) -> Result<RawResponse, TransportError> {
    let mut headers = Vec::new();
    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }
    let status = easy.response_code()?;
    Ok(RawResponse {
        status,
        headers,
        body,
    })
}

/// `GET url`. Runs in the current thread.
pub fn get(url: &str, options: HttpOptions) -> Result<RawResponse, TransportError> {
    let mut easy = Easy::new();
    configure(&mut easy, url, options)?;
    easy.get(true)?;
    perform(easy)
}

/// Multipart `POST` of one file part. Runs in the current thread.
fn post_file(
    url: &str,
    field_name: &str,
    file: &LocalFile,
    options: HttpOptions,
) -> Result<RawResponse, TransportError> {
    let contents = std::fs::read(&file.path).map_err(|source| TransportError::ReadFile {
        path: file.path.clone(),
        source,
    })?;

    let mut easy = Easy::new();
    configure(&mut easy, url, options)?;

    // No `Expect: 100-continue` round trip before the body.
    let mut list = List::new();
    list.append("Expect:")?;
    easy.http_headers(list)?;

    let mut form = Form::new();
    form.part(field_name)
        .buffer(file.name.as_str(), contents)
        .content_type(content_type_for(&file.name))
        .add()?;
    easy.httppost(form)?;

    perform(easy)
}

/// Uploads local files to the processing server with libcurl.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    upload_url: String,
    options: HttpOptions,
}

impl CurlTransport {
    pub fn new(upload_url: impl Into<String>, options: HttpOptions) -> Self {
        Self {
            upload_url: upload_url.into(),
            options,
        }
    }

    pub fn from_config(cfg: &BomupConfig) -> anyhow::Result<Self> {
        Ok(Self::new(cfg.upload_url()?, HttpOptions::from_config(cfg)))
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

#[async_trait(?Send)]
impl UploadTransport for CurlTransport {
    type File = LocalFile;
    type Body = Vec<u8>;

    async fn post(&self, request: UploadRequest<LocalFile>) -> UploadOutcome<Vec<u8>> {
        let url = self.upload_url.clone();
        let options = self.options;
        tracing::debug!(url = %url, file = %request.file.path.display(), "POST multipart upload");

        let joined = tokio::task::spawn_blocking(move || {
            post_file(&url, request.field_name, &request.file, options)
        })
        .await;

        match joined {
            Ok(Ok(response)) => {
                tracing::debug!(
                    status = response.status,
                    bytes = response.body.len(),
                    "upload response"
                );
                response.into_outcome()
            }
            Ok(Err(e)) => UploadOutcome::Unreachable {
                message: e.to_string(),
            },
            Err(e) => UploadOutcome::Unreachable {
                message: format!("upload task failed: {e}"),
            },
        }
    }
}
