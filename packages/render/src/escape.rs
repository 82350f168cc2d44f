/// Escape text for safe interpolation into HTML element content.
///
/// Everything operator-entered is escaped before rendering; only `custom`
/// blocks bypass this (their entire purpose is author-supplied markup).
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
