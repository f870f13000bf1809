/// Remove any `<...>` tag sequence from feed text.
///
/// Deliberately not a real HTML parser: feeds embed arbitrary markup and
/// the downstream schema only wants plain text, so every angle-bracket
/// run is dropped wholesale. An unclosed `<` swallows the rest of the
/// string, matching the usual regex `<[^>]+>` behavior closely enough
/// for feed content.
pub fn strip_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;

    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }

    out.trim().to_string()
}

/// Truncate to at most `max_chars` characters (not bytes), so multi-byte
/// feed content never gets split mid-codepoint.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
