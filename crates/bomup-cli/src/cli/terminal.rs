//! Terminal rendering of the upload form.
//!
//! The "picker" is the path given on the command line. Status messages go to
//! stdout and errors to stderr as they are set; the link is kept so the
//! upload command can save its target.

use bomup_core::view::{LocalFile, UploadView};

#[derive(Debug, Default)]
pub struct TerminalView {
    picked: Option<LocalFile>,
    error: String,
    link: Option<(String, String)>,
}

impl TerminalView {
    pub fn new(picked: Option<LocalFile>) -> Self {
        Self {
            picked,
            ..Self::default()
        }
    }

    /// Last error shown, empty if none.
    pub fn error(&self) -> &str {
        &self.error
    }

    /// `(href, filename)` of the visible download link.
    pub fn link(&self) -> Option<(&str, &str)> {
        self.link
            .as_ref()
            .map(|(href, name)| (href.as_str(), name.as_str()))
    }
}

impl UploadView for TerminalView {
    type File = LocalFile;

    fn selected_file(&self) -> Option<LocalFile> {
        self.picked.clone()
    }

    fn set_message(&mut self, text: &str) {
        if !text.is_empty() {
            println!("{text}");
        }
    }

    fn set_error(&mut self, text: &str) {
        if !text.is_empty() {
            eprintln!("{text}");
        }
        self.error = text.to_string();
    }

    fn show_download(&mut self, href: &str, filename: &str) {
        tracing::debug!(href, filename, "download link shown");
        self.link = Some((href.to_string(), filename.to_string()));
    }

    fn hide_download(&mut self) {
        self.link = None;
    }

    fn set_submit_enabled(&mut self, _enabled: bool) {}
}
