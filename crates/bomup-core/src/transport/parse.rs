//! Parse HTTP response header lines into ResponseMeta.

use super::ResponseMeta;

/// Parse collected header lines for a response with `status`.
///
/// A status line starts a new header block and discards what earlier blocks
/// (redirects, interim `1xx` responses) set; only the last block counts.
pub fn parse_headers(status: u32, lines: &[String]) -> ResponseMeta {
    let fresh = || ResponseMeta {
        status,
        ..ResponseMeta::default()
    };
    let mut meta = fresh();

    for line in lines {
        let line = line.trim();
        if line.starts_with("HTTP/") {
            meta = fresh();
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-type") {
            meta.content_type = Some(value.to_string());
        } else if name.eq_ignore_ascii_case("content-length") {
            meta.content_length = value.parse::<u64>().ok();
        } else if name.eq_ignore_ascii_case("content-disposition") {
            meta.content_disposition = Some(value.to_string());
        }
    }

    meta
}
