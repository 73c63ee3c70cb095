//! UploadView that just remembers what it was told to show.

use bomup_core::view::{LocalFile, UploadView};

#[derive(Debug, Default)]
pub struct RecordingView {
    pub file: Option<LocalFile>,
    pub message: String,
    pub error: String,
    pub href: Option<String>,
    pub download_name: Option<String>,
    pub link_visible: bool,
    pub submit_enabled: bool,
}

impl RecordingView {
    pub fn picking(file: LocalFile) -> Self {
        Self {
            file: Some(file),
            submit_enabled: true,
            ..Self::default()
        }
    }
}

impl UploadView for RecordingView {
    type File = LocalFile;

    fn selected_file(&self) -> Option<LocalFile> {
        self.file.clone()
    }

    fn set_message(&mut self, text: &str) {
        self.message = text.to_string();
    }

    fn set_error(&mut self, text: &str) {
        self.error = text.to_string();
    }

    fn show_download(&mut self, href: &str, filename: &str) {
        self.href = Some(href.to_string());
        self.download_name = Some(filename.to_string());
        self.link_visible = true;
    }

    fn hide_download(&mut self) {
        self.link_visible = false;
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }
}
