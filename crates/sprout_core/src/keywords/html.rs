//! Markup-to-text conversion for extraction input.

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_STYLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").expect("valid script regex")
});
static BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|li|h[1-6]|blockquote|pre|tr)\s*>")
        .expect("valid break regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Strips markup down to plain text.
///
/// Rules:
/// - `script`/`style` elements are dropped with their content.
/// - Line breaks and block closers become whitespace so words don't fuse.
/// - Remaining tags are removed and common entities decoded.
/// - Whitespace runs collapse to one space; result is trimmed.
pub fn strip_html(markup: &str) -> String {
    let without_scripts = SCRIPT_STYLE_RE.replace_all(markup, " ");
    let with_breaks = BREAK_RE.replace_all(&without_scripts, " ");
    let without_tags = TAG_RE.replace_all(&with_breaks, "");
    let decoded = decode_entities(&without_tags);
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    // `&amp;` goes last so `&amp;lt;` decodes to the literal `&lt;`.
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::strip_html;

    #[test]
    fn removes_tags_and_keeps_word_boundaries() {
        let text = strip_html("<h1>Project</h1><p>Ideas<br>for the <em>garden</em></p>");
        assert_eq!(text, "Project Ideas for the garden");
    }

    #[test]
    fn drops_script_content_and_decodes_entities() {
        let text = strip_html("<script>alert(1)</script>Salt &amp; pepper &lt;3&nbsp;always");
        assert_eq!(text, "Salt & pepper <3 always");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_html("  just   text \n"), "just text");
        assert_eq!(strip_html(""), "");
    }
}
