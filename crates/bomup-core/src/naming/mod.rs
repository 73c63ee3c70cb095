//! Filename derivation for processed downloads.
//!
//! The download link suggests the original name with `.xlsx` swapped for
//! `_updated.xlsx`. When the CLI saves the result to disk, the suggestion (or
//! the server's own Content-Disposition name) is sanitized first.

mod content_disposition;
mod sanitize;

pub use content_disposition::parse_content_disposition_filename;
pub use sanitize::sanitize_filename;

/// Extension the processing server accepts.
pub const SOURCE_EXTENSION: &str = ".xlsx";

/// What `SOURCE_EXTENSION` becomes in the suggested download name.
pub const PROCESSED_EXTENSION: &str = "_updated.xlsx";

/// Used when nothing usable is left after sanitizing.
const DEFAULT_FILENAME: &str = "download.xlsx";

/// Suggested name for the processed file.
///
/// Replaces the first literal `.xlsx` with `_updated.xlsx`. Names without that
/// substring come back unchanged.
///
/// # Examples
///
/// - `suggested_download_name("report.xlsx")` → `"report_updated.xlsx"`
/// - `suggested_download_name("report.csv")` → `"report.csv"`
pub fn suggested_download_name(original: &str) -> String {
    original.replacen(SOURCE_EXTENSION, PROCESSED_EXTENSION, 1)
}

/// Final on-disk name for a saved download.
///
/// With `prefer_server` set and a server-provided name present, that name wins;
/// otherwise the suggested name is used. The result is always sanitized.
pub fn save_name(suggested: &str, server: Option<&str>, prefer_server: bool) -> String {
    let raw = match server.filter(|s| prefer_server && !s.trim().is_empty()) {
        Some(s) => s,
        None => suggested,
    };

    let sanitized = sanitize_filename(raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xlsx_gets_updated_suffix() {
        assert_eq!(suggested_download_name("report.xlsx"), "report_updated.xlsx");
        assert_eq!(suggested_download_name("data.xlsx"), "data_updated.xlsx");
    }

    #[test]
    fn other_extensions_unchanged() {
        assert_eq!(suggested_download_name("report.csv"), "report.csv");
        assert_eq!(suggested_download_name("README"), "README");
        assert_eq!(suggested_download_name("REPORT.XLSX"), "REPORT.XLSX");
    }

    #[test]
    fn only_first_occurrence_replaced() {
        assert_eq!(
            suggested_download_name("a.xlsx.xlsx"),
            "a_updated.xlsx.xlsx"
        );
        assert_eq!(
            suggested_download_name("backup.xlsx.old"),
            "backup_updated.xlsx.old"
        );
    }

    #[test]
    fn save_name_uses_suggestion_by_default() {
        assert_eq!(
            save_name("bom_updated.xlsx", Some("server.xlsx"), false),
            "bom_updated.xlsx"
        );
    }

    #[test]
    fn save_name_prefers_server_when_asked() {
        assert_eq!(
            save_name("bom_updated.xlsx", Some("server.xlsx"), true),
            "server.xlsx"
        );
        assert_eq!(
            save_name("bom_updated.xlsx", None, true),
            "bom_updated.xlsx"
        );
        assert_eq!(
            save_name("bom_updated.xlsx", Some("  "), true),
            "bom_updated.xlsx"
        );
    }

    #[test]
    fn save_name_sanitizes_and_falls_back() {
        assert_eq!(save_name("../../etc/x.xlsx", None, false), "etc_x.xlsx");
        assert_eq!(save_name("..", None, false), "download.xlsx");
        assert_eq!(save_name("", None, false), "download.xlsx");
    }
}
