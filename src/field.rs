//! Field quoting for two-column flashcard CSV output.

/// Trim surrounding whitespace, counting the ASCII file, group, record and
/// unit separators (U+001C to U+001F) as whitespace too.
pub fn trim_field(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
}

/// Strip one matching pair of outer double quotes, if present.
///
/// A lone `"` is not considered wrapped.
pub fn unwrap_quoted(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Normalize a raw field into a double-quoted CSV field.
///
/// Surrounding whitespace is trimmed and a single pair of outer quotes is
/// removed first, so fields that were already quoted in the source are not
/// wrapped twice. Interior quotes are doubled per RFC 4180.
///
/// ```
/// use flashcard_csv::quote;
///
/// assert_eq!(quote("  hello "), "\"hello\"");
/// assert_eq!(quote("\"hi\""), "\"hi\"");
/// assert_eq!(quote("say \"cheese\""), "\"say \"\"cheese\"\"\"");
/// assert_eq!(quote(""), "\"\"");
/// ```
pub fn quote(raw: &str) -> String {
    let inner = unwrap_quoted(trim_field(raw));

    let mut out = String::with_capacity(inner.len() + 2);
    out.push('"');
    for c in inner.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
    out
}
