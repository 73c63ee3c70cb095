//! Filesystem-safe filename sanitization.

/// Linux NAME_MAX, in bytes.
const NAME_MAX: usize = 255;

fn is_unsafe(c: char) -> bool {
    matches!(c, '\0' | '/' | '\\' | ' ' | '\t') || c.is_control()
}

/// Sanitizes a candidate filename before the CLI writes it to disk.
///
/// Path separators, NUL, whitespace and control characters become `_`, runs
/// of `_` collapse to one, leading/trailing dots and underscores are trimmed,
/// and the result is cut to 255 bytes on a char boundary.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let c = if is_unsafe(c) { '_' } else { c };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    let mut end = trimmed.len().min(NAME_MAX);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}
