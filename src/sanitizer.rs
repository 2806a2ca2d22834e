use reqwest::Url;

/// Href used in place of any link that is not plain http(s).
pub const SAFE_URL_PLACEHOLDER: &str = "#";

/// Escapes markup-significant characters so `text` can be placed into HTML
/// element content or a quoted attribute value and display as itself.
pub fn escape_text(text: &str) -> String {
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

/// Returns `url` unchanged when it parses with an `http` or `https` scheme,
/// otherwise [`SAFE_URL_PLACEHOLDER`]. Never fails.
pub fn sanitize_url(url: &str) -> &str {
    match Url::parse(url) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => url,
        _ => SAFE_URL_PLACEHOLDER,
    }
}
