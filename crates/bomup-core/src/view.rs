//! Capability interface the controller drives instead of touching UI elements
//! directly. The browser binds it to DOM nodes; the CLI binds it to the terminal.

/// A file chosen in the picker.
pub trait PickedFile {
    /// Original name as the user's system reports it (no directory part).
    fn file_name(&self) -> String;
}

/// The submit event handed to the controller.
pub trait SubmitEvent {
    /// Suppress the host's default submission behaviour (page navigation in a browser).
    fn prevent_default(&self);
}

/// Submission that has no host default to suppress (terminal, tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectSubmit;

impl SubmitEvent for DirectSubmit {
    fn prevent_default(&self) {}
}

/// Output regions and input controls of the upload form.
pub trait UploadView {
    type File: PickedFile;

    /// The file currently selected in the picker, if any.
    fn selected_file(&self) -> Option<Self::File>;

    /// Replace the status message text. Empty clears it.
    fn set_message(&mut self, text: &str);

    /// Replace the error message text. Empty clears it.
    fn set_error(&mut self, text: &str);

    /// Point the download link at `href`, suggest `filename`, and reveal its container.
    fn show_download(&mut self, href: &str, filename: &str);

    /// Hide the download link container.
    fn hide_download(&mut self);

    /// Enable or disable the submit control.
    fn set_submit_enabled(&mut self, enabled: bool);
}

/// A file picked from the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: std::path::PathBuf,
    pub name: String,
}

impl LocalFile {
    /// Picks `path`, naming it after its final component.
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }
}

impl PickedFile for LocalFile {
    fn file_name(&self) -> String {
        self.name.clone()
    }
}
