//! Browser binding: wires the upload form to an [`UploadController`].
//!
//! The page provides the form and its output regions by id (see [`dom`]);
//! [`attach`] binds them and registers the submit listener.

pub mod dom;
pub mod fetch;
pub mod logging;
pub mod object_url;

use std::cell::RefCell;
use std::rc::Rc;

use bomup_core::controller::{Submission, UploadController};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlFormElement};

pub use dom::{DomFile, DomView, FormSubmit};
pub use fetch::FetchTransport;
pub use object_url::BlobUrlStore;

type PageController = UploadController<DomView, FetchTransport, BlobUrlStore>;

/// Binds the upload form in `document` and starts handling its submits.
#[wasm_bindgen]
pub fn attach(document: &Document) -> Result<(), JsValue> {
    let form: HtmlFormElement = dom::by_id(document, dom::FORM_ID)?;
    let view = DomView::bind(document, &form)?;
    let controller = Rc::new(RefCell::new(UploadController::new(
        view,
        FetchTransport::default(),
        BlobUrlStore::default(),
    )));

    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        handle_submit(&controller, &event);
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    // The listener lives as long as the page.
    on_submit.forget();

    tracing::debug!("upload form attached");
    Ok(())
}

fn handle_submit(controller: &Rc<RefCell<PageController>>, event: &Event) {
    let request = {
        // Borrowed for the whole upload; a submit arriving meanwhile lands here.
        let Ok(mut ctl) = controller.try_borrow_mut() else {
            event.prevent_default();
            tracing::warn!("submit ignored: previous upload has not settled");
            return;
        };
        match ctl.begin(&FormSubmit(event)) {
            Submission::Started(request) => request,
            Submission::Invalid | Submission::Busy => return,
        }
    };

    let controller = Rc::clone(controller);
    wasm_bindgen_futures::spawn_local(async move {
        let Ok(mut ctl) = controller.try_borrow_mut() else {
            tracing::error!("controller borrowed while starting upload");
            return;
        };
        #[allow(clippy::await_holding_refcell_ref)]
        let status = ctl.complete(request).await;
        tracing::debug!(?status, "upload settled");
    });
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init_logging();
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    attach(&document)
}
