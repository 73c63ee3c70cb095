//! Content-Disposition filename extraction (`filename` and RFC 5987 `filename*`).

/// Returns the attachment filename carried by a Content-Disposition value.
///
/// `filename*=UTF-8''…` wins over `filename=` when both are present. Quoted
/// values are unescaped; extended values are percent-decoded.
pub fn parse_content_disposition_filename(header_value: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in split_params(header_value).into_iter().skip(1) {
        let Some((key, raw)) = param.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let raw = raw.trim();
        match key.as_str() {
            "filename*" => extended = decode_extended(raw),
            "filename" => plain = Some(unquote(raw)),
            _ => {}
        }
    }

    extended.or(plain).filter(|name| !name.is_empty())
}

/// Splits on `;` outside quoted strings.
fn split_params(value: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;
    for (i, c) in value.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ';' if !quoted => {
                params.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    params.push(&value[start..]);
    params
}

/// `"a \"b\""` → `a "b"`; bare tokens pass through.
fn unquote(raw: &str) -> String {
    let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return raw.to_string();
    };
    let mut out = String::with_capacity(inner.len());
    let mut escaped = false;
    for c in inner.chars() {
        if escaped || c != '\\' {
            out.push(c);
            escaped = false;
        } else {
            escaped = true;
        }
    }
    out
}

/// `UTF-8''caf%C3%A9.xlsx` → `café.xlsx`. Other charsets are not supported.
fn decode_extended(raw: &str) -> Option<String> {
    let (charset, rest) = raw.split_once('\'')?;
    if !charset.eq_ignore_ascii_case("utf-8") {
        return None;
    }
    let (_language, encoded) = rest.split_once('\'')?;

    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hi = (bytes[i + 1] as char).to_digit(16);
            let lo = (bytes[i + 2] as char).to_digit(16);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                out.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_filename() {
        let r = parse_content_disposition_filename("attachment; filename=\"bom_updated.xlsx\"");
        assert_eq!(r.as_deref(), Some("bom_updated.xlsx"));
    }

    #[test]
    fn token_filename() {
        let r = parse_content_disposition_filename("attachment; filename=bom.xlsx");
        assert_eq!(r.as_deref(), Some("bom.xlsx"));
    }

    #[test]
    fn escaped_quotes_unescaped() {
        let r = parse_content_disposition_filename(r#"attachment; filename="say \"hi\".xlsx""#);
        assert_eq!(r.as_deref(), Some("say \"hi\".xlsx"));
    }

    #[test]
    fn extended_filename_decoded_and_preferred() {
        let r = parse_content_disposition_filename(
            "attachment; filename=\"fallback.xlsx\"; filename*=UTF-8''caf%C3%A9%20list.xlsx",
        );
        assert_eq!(r.as_deref(), Some("café list.xlsx"));
    }

    #[test]
    fn semicolon_inside_quotes_kept() {
        let r = parse_content_disposition_filename("attachment; filename=\"a;b.xlsx\"; size=10");
        assert_eq!(r.as_deref(), Some("a;b.xlsx"));
        assert_eq!(
            split_params(r#"attachment; filename="x\";y"; n=1"#),
            vec!["attachment", r#" filename="x\";y""#, " n=1"]
        );
    }

    #[test]
    fn missing_filename() {
        assert_eq!(parse_content_disposition_filename("inline"), None);
        assert_eq!(parse_content_disposition_filename("attachment; filename=\"\""), None);
    }
}
