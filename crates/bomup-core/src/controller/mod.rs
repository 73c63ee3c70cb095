//! Form submission controller.
//!
//! Mediates between a submit action and a single upload request and turns
//! the outcome into feedback on an injected [`UploadView`]. A submit is split
//! in two: [`UploadController::begin`] runs synchronously inside the event
//! handler (suppress the default action, reset the form, validate, build the
//! request), and [`UploadController::complete`] awaits the transport and
//! renders the result. Hosts without an event loop can call
//! [`UploadController::submit`], which does both.

mod state;


pub use state::{Submission, UiStatus, ERROR_PREFIX, MSG_NO_FILE, MSG_PROCESSING, MSG_SUCCESS};

use crate::artifact::DownloadStore;
use crate::naming::suggested_download_name;
use crate::transport::{UploadFailure, UploadRequest, UploadTransport};
use crate::view::{PickedFile, SubmitEvent, UploadView};

pub struct UploadController<V, T, S> {
    view: V,
    transport: T,
    store: S,
    status: UiStatus,
    in_flight: bool,
    /// Href of the resource the download link currently points at.
    published: Option<String>,
}

impl<V, T, S> UploadController<V, T, S>
where
    V: UploadView,
    T: UploadTransport<File = V::File>,
    S: DownloadStore<Body = T::Body>,
{
    pub fn new(view: V, transport: T, store: S) -> Self {
        Self {
            view,
            transport,
            store,
            status: UiStatus::Idle,
            in_flight: false,
            published: None,
        }
    }

    pub fn status(&self) -> &UiStatus {
        &self.status
    }

    /// True between a `Started` submission and its `complete`.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Synchronous half of a submit.
    ///
    /// Always suppresses the event's default action. While an upload is in
    /// flight nothing else happens. Otherwise the message and error regions
    /// are cleared, the download link is hidden and its resource released,
    /// and the file selection is validated.
    pub fn begin<E: SubmitEvent + ?Sized>(&mut self, event: &E) -> Submission<V::File> {
        event.prevent_default();

        if self.in_flight {
            tracing::warn!("submit ignored: previous upload has not settled");
            return Submission::Busy;
        }

        self.view.set_message("");
        self.view.set_error("");
        self.release();

        let Some(file) = self.view.selected_file() else {
            self.view.set_error(MSG_NO_FILE);
            self.status = UiStatus::Failed {
                error: MSG_NO_FILE.to_string(),
            };
            return Submission::Invalid;
        };

        tracing::info!(file = %file.file_name(), "upload started");
        let request = UploadRequest::new(file);
        self.view.set_message(MSG_PROCESSING);
        self.view.set_submit_enabled(false);
        self.in_flight = true;
        self.status = UiStatus::Processing;
        Submission::Started(request)
    }

    /// Asynchronous half: send `request` once and render the outcome.
    pub async fn complete(&mut self, request: UploadRequest<V::File>) -> UiStatus {
        let original = request.file.file_name();
        let outcome = self.transport.post(request).await;
        self.in_flight = false;
        self.view.set_submit_enabled(true);

        let delivered = match outcome.into_result() {
            Ok((body, meta)) => match self.store.publish(body) {
                Ok(href) => Ok((href, meta)),
                Err(e) => Err(UploadFailure::Publish(format!("{e:#}"))),
            },
            Err(failure) => Err(failure),
        };

        self.status = match delivered {
            Ok((href, meta)) => {
                let filename = suggested_download_name(&original);
                self.view.show_download(&href, &filename);
                self.view.set_message(MSG_SUCCESS);
                tracing::info!(
                    file = %original,
                    download = %filename,
                    content_length = ?meta.content_length,
                    "upload processed"
                );
                self.published = Some(href.clone());
                UiStatus::Ready {
                    href,
                    filename,
                    server_filename: meta.server_filename(),
                }
            }
            Err(failure) => {
                let error = format!("{ERROR_PREFIX}{failure}");
                self.view.set_error(&error);
                self.view.set_message("");
                tracing::error!(file = %original, status = ?failure.status(), "{}", error);
                UiStatus::Failed { error }
            }
        };
        self.status.clone()
    }

    /// `begin`, then `complete` when a request was started.
    pub async fn submit<E: SubmitEvent + ?Sized>(&mut self, event: &E) -> UiStatus {
        match self.begin(event) {
            Submission::Started(request) => self.complete(request).await,
            Submission::Invalid | Submission::Busy => self.status.clone(),
        }
    }

    /// Hide the download link and release the resource behind it.
    pub fn release(&mut self) {
        self.view.hide_download();
        if let Some(href) = self.published.take() {
            self.store.release(&href);
            tracing::debug!(href = %href, "released download");
        }
    }
}
