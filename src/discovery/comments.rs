use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

// An unterminated block runs to end of input.
const COMMENT_BLOCK_PATTERN: &str = r"(?s)\{/\*.*?(?:\*/\}|\z)";

static COMMENT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(COMMENT_BLOCK_PATTERN).expect("Failed to compile comment block pattern")
});

/// Remove every `{/* ... */}` block from `text`.
///
/// Blocks are replaced by nothing, not by padding. Removal repeats until
/// the text stops changing, so markers that only meet once an inner block
/// is gone are stripped too and the function is idempotent.
pub fn strip_comments(text: &str) -> String {
    let mut current = match COMMENT_BLOCK.replace_all(text, "") {
        Cow::Borrowed(unchanged) => return unchanged.to_string(),
        Cow::Owned(stripped) => stripped,
    };

    loop {
        match COMMENT_BLOCK.replace_all(&current, "") {
            Cow::Borrowed(_) => return current,
            Cow::Owned(stripped) => current = stripped,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn test_strip_comments__no_comments() {
        let text = "# Title\n<Card href=\"/a\" />\n";
        assert_eq!(strip_comments(text), text);
    }

    #[test]
    fn test_strip_comments__inline_block() {
        assert_eq!(strip_comments("a{/* b */}c"), "ac");
    }

    #[test]
    fn test_strip_comments__multiline_block() {
        let text = "line1\n{/*\n<Card href=\"/hidden\" />\n*/}\nline5";
        assert_eq!(strip_comments(text), "line1\n\nline5");
    }

    #[test]
    fn test_strip_comments__multiple_blocks() {
        assert_eq!(strip_comments("{/* a */}x{/* b */}y{/* c */}"), "xy");
    }

    #[test]
    fn test_strip_comments__unterminated_block_swallows_rest() {
        assert_eq!(strip_comments("keep {/* never closed\nmore"), "keep ");
    }

    #[test]
    fn test_strip_comments__nested_markers_are_idempotent() {
        let text = "a{/{/* inner */}* outer */}b";
        let once = strip_comments(text);

        assert_eq!(once, "ab");
        assert_eq!(strip_comments(&once), once);
    }

    #[test]
    fn test_strip_comments__plain_js_comment_is_untouched() {
        let text = "/* not mdx */ {value}";
        assert_eq!(strip_comments(text), text);
    }
}
