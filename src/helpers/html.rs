//! HTML helper functions

/// Escape the characters that are significant in HTML text and attributes
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render tags as inline spans, in order
///
/// # Examples
/// ```ignore
/// tag_spans(&["rust".into()]) // -> <span class="tag">rust</span>
/// ```
pub fn tag_spans(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!(r#"<span class="tag">{}</span>"#, tag))
        .collect()
}
