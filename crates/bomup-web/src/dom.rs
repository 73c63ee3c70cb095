//! The upload page's DOM, bound once by element id.

use bomup_core::view::{PickedFile, SubmitEvent, UploadView};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, HtmlAnchorElement, HtmlButtonElement, HtmlElement,
    HtmlFormElement, HtmlInputElement,
};

pub const FORM_ID: &str = "uploadForm";
pub const FILE_INPUT_ID: &str = "fileInput";
pub const DOWNLOAD_BOX_ID: &str = "downloadLink";
pub const FILE_LINK_ID: &str = "fileLink";
pub const MESSAGE_ID: &str = "message";
pub const ERROR_ID: &str = "error";

/// Controls that submit the form, in lookup order.
const SUBMIT_SELECTOR: &str = "button[type=submit], button:not([type]), input[type=submit]";

/// CSS `display` value for the download container.
pub(crate) fn display_value(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}

/// Element `id` cast to `T`.
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has an unexpected type")))
}

/// A file taken from the picker's `FileList`.
#[derive(Debug, Clone)]
pub struct DomFile(pub web_sys::File);

impl PickedFile for DomFile {
    fn file_name(&self) -> String {
        self.0.name()
    }
}

/// The form's `submit` event.
pub struct FormSubmit<'a>(pub &'a Event);

impl SubmitEvent for FormSubmit<'_> {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

/// The form's submit control, disabled while an upload is pending.
#[derive(Debug, Clone)]
enum SubmitControl {
    Button(HtmlButtonElement),
    Input(HtmlInputElement),
}

impl SubmitControl {
    fn from_element(el: Element) -> Option<Self> {
        match el.dyn_into::<HtmlButtonElement>() {
            Ok(button) => Some(Self::Button(button)),
            Err(el) => el.dyn_into::<HtmlInputElement>().ok().map(Self::Input),
        }
    }

    fn set_disabled(&self, disabled: bool) {
        match self {
            Self::Button(button) => button.set_disabled(disabled),
            Self::Input(input) => input.set_disabled(disabled),
        }
    }
}

pub struct DomView {
    file_input: HtmlInputElement,
    download_box: HtmlElement,
    file_link: HtmlAnchorElement,
    message: Element,
    error: Element,
    submit: Option<SubmitControl>,
}

impl DomView {
    /// Looks up every element the form needs. The submit control is optional;
    /// without one, overlapping submits are still refused by the controller.
    pub fn bind(document: &Document, form: &HtmlFormElement) -> Result<Self, JsValue> {
        let submit = form
            .query_selector(SUBMIT_SELECTOR)?
            .and_then(SubmitControl::from_element);
        if submit.is_none() {
            tracing::debug!("no submit control in #{FORM_ID}");
        }
        Ok(Self {
            file_input: by_id(document, FILE_INPUT_ID)?,
            download_box: by_id(document, DOWNLOAD_BOX_ID)?,
            file_link: by_id(document, FILE_LINK_ID)?,
            message: by_id(document, MESSAGE_ID)?,
            error: by_id(document, ERROR_ID)?,
            submit,
        })
    }

    fn set_download_visible(&self, visible: bool) {
        if let Err(err) = self
            .download_box
            .style()
            .set_property("display", display_value(visible))
        {
            tracing::warn!("cannot toggle #{DOWNLOAD_BOX_ID}: {:?}", err);
        }
    }
}

impl UploadView for DomView {
    type File = DomFile;

    fn selected_file(&self) -> Option<DomFile> {
        self.file_input
            .files()
            .and_then(|files| files.item(0))
            .map(DomFile)
    }

    fn set_message(&mut self, text: &str) {
        self.message.set_text_content(Some(text));
    }

    fn set_error(&mut self, text: &str) {
        self.error.set_text_content(Some(text));
    }

    fn show_download(&mut self, href: &str, filename: &str) {
        self.file_link.set_href(href);
        self.file_link.set_download(filename);
        self.set_download_visible(true);
    }

    fn hide_download(&mut self) {
        self.set_download_visible(false);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        if let Some(control) = &self.submit {
            control.set_disabled(!enabled);
        }
    }
}
