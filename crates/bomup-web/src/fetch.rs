//! Upload over the browser's `fetch`.

use async_trait::async_trait;
use bomup_core::config::BomupConfig;
use bomup_core::transport::{ResponseMeta, UploadOutcome, UploadRequest, UploadTransport};
use bomup_core::view::PickedFile;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, FormData, RequestInit, Response};

use crate::dom::DomFile;

/// Human-readable text of a JS exception or rejection value.
pub(crate) fn js_error_message(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Posts the form to a URL relative to the page origin.
#[derive(Debug, Clone)]
pub struct FetchTransport {
    url: String,
}

impl Default for FetchTransport {
    fn default() -> Self {
        Self::new(BomupConfig::default().upload_path)
    }
}

impl FetchTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send(&self, request: UploadRequest<DomFile>) -> Result<UploadOutcome<Blob>, JsValue> {
        let form = FormData::new()?;
        form.append_with_blob_and_filename(
            request.field_name,
            &request.file.0,
            &request.file.file_name(),
        )?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&form);

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let response: Response = JsFuture::from(window.fetch_with_str_and_init(&self.url, &init))
            .await?
            .dyn_into()?;
        let status = u32::from(response.status());

        if !response.ok() {
            let text = JsFuture::from(response.text()?)
                .await?
                .as_string()
                .unwrap_or_default();
            return Ok(UploadOutcome::Rejected { status, text });
        }

        let headers = response.headers();
        let header = |name: &str| headers.get(name).ok().flatten();
        let meta = ResponseMeta {
            status,
            content_type: header("content-type"),
            content_length: header("content-length").and_then(|v| v.trim().parse().ok()),
            content_disposition: header("content-disposition"),
        };
        let body: Blob = JsFuture::from(response.blob()?).await?.dyn_into()?;
        Ok(UploadOutcome::Delivered { body, meta })
    }
}

#[async_trait(?Send)]
impl UploadTransport for FetchTransport {
    type File = DomFile;
    type Body = Blob;

    async fn post(&self, request: UploadRequest<DomFile>) -> UploadOutcome<Blob> {
        match self.send(request).await {
            Ok(outcome) => outcome,
            Err(err) => UploadOutcome::Unreachable {
                message: js_error_message(&err),
            },
        }
    }
}
