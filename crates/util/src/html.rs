/// Escapes the characters that are significant inside HTML text and
/// attribute values.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for character in input.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Reverses [`escape_html`]. `&amp;` is decoded last so escaped entity text
/// such as `&amp;lt;` comes back as `&lt;`.
pub fn unescape_html(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html("<b>a & 'b'</b>"), "&lt;b&gt;a &amp; &#39;b&#39;&lt;/b&gt;");
        assert_eq!(escape_html("./results"), "./results");
    }

    #[test]
    fn unescaping_restores_the_original_text() {
        for original in ["Alignment & QC", "<tag> 'quoted' \"double\"", "&lt; literal", "plain"] {
            assert_eq!(unescape_html(&escape_html(original)), original);
        }
    }
}
