use memchr::memchr_iter;
use regex::Regex;

use std::path::Path;

use crate::core::constants::extraction::LINE_WINDOW_RADIUS;
use crate::core::error::Result;
use crate::core::types::{Document, LinkOccurrence};

pub trait HrefFinder {
    fn find_hrefs(&self, document: &Document) -> Vec<LinkOccurrence>;
}

/// Finds `href` attributes on one component tag, e.g. `<Card ... href="...">`.
///
/// The tag name is matched case-insensitively, attributes may come in any
/// order and the tag may span several lines. Anything else in the document
/// is opaque text.
#[derive(Debug, Clone)]
pub struct HrefExtractor {
    pattern: Regex,
}

impl HrefExtractor {
    pub fn new(component: &str) -> Result<Self> {
        let pattern = format!(
            r#"(?is)<\s*{}\b[^>]*?\shref\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
            regex::escape(component)
        );
        Ok(Self {
            pattern: Regex::new(&pattern)?,
        })
    }

    /// Extract occurrences from `filtered`, reporting lines against `raw`.
    ///
    /// `filtered` must be `raw` with comment blocks stripped.
    pub fn extract(&self, path: &Path, raw: &str, filtered: &str) -> Vec<LinkOccurrence> {
        self.pattern
            .captures_iter(filtered)
            .filter_map(|caps| {
                let tag = caps.get(0)?;
                let (value, quote) = match (caps.get(1), caps.get(2)) {
                    (Some(double), _) => (double.as_str(), '"'),
                    (None, Some(single)) => (single.as_str(), '\''),
                    (None, None) => return None,
                };
                let line = recover_line(raw, filtered, tag.start(), value, quote);
                Some(LinkOccurrence::new(path, value.trim(), line))
            })
            .collect()
    }
}

impl HrefFinder for HrefExtractor {
    fn find_hrefs(&self, document: &Document) -> Vec<LinkOccurrence> {
        let filtered = document.filtered();
        self.extract(&document.path, &document.content, &filtered)
    }
}

/// Best-effort original line number for a match at `offset` in `filtered`.
///
/// Searches a ±`LINE_WINDOW_RADIUS` window of `raw` anchored at the same
/// offset for the first literal `href=<q>value<q>`. On a miss (stripped
/// comments shifted the tag out of the window, or the attribute has spaces
/// around `=`) the line is counted in `filtered` instead, which undercounts
/// by the newlines removed with earlier comment blocks.
///
/// The result is approximate. An identical attribute earlier in the window
/// wins over the matched one.
fn recover_line(raw: &str, filtered: &str, offset: usize, value: &str, quote: char) -> u64 {
    let needle = format!("href={quote}{value}{quote}");
    let start = floor_char_boundary(raw, offset.saturating_sub(LINE_WINDOW_RADIUS));
    let end = ceil_char_boundary(raw, offset.saturating_add(LINE_WINDOW_RADIUS));

    let found = raw[start..end].find(&needle).map(|i| start + i);

    match found {
        Some(position) => line_at(raw, position),
        None => line_at(filtered, floor_char_boundary(filtered, offset)),
    }
}

fn line_at(text: &str, offset: usize) -> u64 {
    memchr_iter(b'\n', &text.as_bytes()[..offset]).count() as u64 + 1
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    fn card_extractor() -> HrefExtractor {
        HrefExtractor::new("Card").unwrap()
    }

    fn refs_and_lines(occurrences: &[LinkOccurrence]) -> Vec<(&str, u64)> {
        occurrences
            .iter()
            .map(|o| (o.reference.as_str(), o.line))
            .collect()
    }

    #[test]
    fn test_find_hrefs__no_tags() {
        let doc = Document::new("a.mdx", "# Title\n\nPlain [link](/x) and <a href=\"/y\">y</a>\n");
        assert!(card_extractor().find_hrefs(&doc).is_empty());
    }

    #[test]
    fn test_find_hrefs__tag_on_line_5() {
        let doc = Document::new(
            "a.mdx",
            "---\ntitle: x\n---\n\n<Card title=\"Setup\" href=\"/guides/setup\" />\n",
        );
        let actual = card_extractor().find_hrefs(&doc);

        assert_eq!(refs_and_lines(&actual), vec![("/guides/setup", 5)]);
        assert_eq!(actual[0].document, Path::new("a.mdx"));
    }

    #[test]
    fn test_find_hrefs__single_quotes_and_trimmed_value() {
        let doc = Document::new("a.mdx", "<Card href=' https://example.com '>x</Card>");
        let actual = card_extractor().find_hrefs(&doc);

        assert_eq!(refs_and_lines(&actual), vec![("https://example.com", 1)]);
    }

    #[test]
    fn test_find_hrefs__case_insensitive_tag_name() {
        let doc = Document::new("a.mdx", "<card href=\"/a\" />\n<CARD href=\"/b\" />");
        let actual = card_extractor().find_hrefs(&doc);

        assert_eq!(refs_and_lines(&actual), vec![("/a", 1), ("/b", 2)]);
    }

    #[test]
    fn test_find_hrefs__multiline_tag_any_attribute_order() {
        let text = "intro\n<Card\n  title=\"Quickstart\"\n  icon=\"rocket\"\n  href=\"/quickstart\"\n>\nBody\n</Card>\n";
        let doc = Document::new("a.mdx", text);
        let actual = card_extractor().find_hrefs(&doc);

        assert_eq!(refs_and_lines(&actual), vec![("/quickstart", 5)]);
    }

    #[test]
    fn test_find_hrefs__ignores_other_components_and_prefixed_attributes() {
        let text = "<CardGroup href=\"/group\" />\n<Card data-href=\"/data\" title=\"t\" />\n<Tile href=\"/tile\" />";
        let doc = Document::new("a.mdx", text);

        assert!(card_extractor().find_hrefs(&doc).is_empty());
    }

    #[test]
    fn test_find_hrefs__skips_commented_out_tags() {
        let text = "{/* <Card href=\"/hidden\" /> */}\n<Card href=\"/shown\" />";
        let doc = Document::new("a.mdx", text);
        let actual = card_extractor().find_hrefs(&doc);

        assert_eq!(refs_and_lines(&actual), vec![("/shown", 2)]);
    }

    #[test]
    fn test_find_hrefs__recovers_line_after_multiline_comment() {
        let text = "one\n{/*\ntwo\nthree\n*/}\n<Card href=\"/after\" />";
        let doc = Document::new("a.mdx", text);
        let actual = card_extractor().find_hrefs(&doc);

        assert_eq!(refs_and_lines(&actual), vec![("/after", 6)]);
    }

    #[test]
    fn test_find_hrefs__falls_back_to_filtered_lines_outside_window() {
        let comment = format!("{{/*\n{}\n*/}}\n", "x".repeat(500));
        let text = format!("{comment}<Card href=\"/far\" />");
        let doc = Document::new("a.mdx", text);
        let actual = card_extractor().find_hrefs(&doc);

        // The tag is on line 4 of the raw text; the filtered text has it on line 2.
        assert_eq!(refs_and_lines(&actual), vec![("/far", 2)]);
    }

    #[test]
    fn test_find_hrefs__same_reference_twice_is_not_deduplicated() {
        let text = "<Card href=\"/same\" />\n\n<Card href=\"/same\" />";
        let doc = Document::new("a.mdx", text);
        let actual = card_extractor().find_hrefs(&doc);

        // Both attributes fall in one window, so the first one's line is reported twice.
        assert_eq!(refs_and_lines(&actual), vec![("/same", 1), ("/same", 1)]);
    }

    #[test]
    fn test_find_hrefs__same_reference_far_apart_keeps_own_lines() {
        let text = format!(
            "<Card href=\"/same\" />\n{}\n<Card href=\"/same\" />",
            "filler ".repeat(60)
        );
        let doc = Document::new("a.mdx", text);
        let actual = card_extractor().find_hrefs(&doc);

        assert_eq!(refs_and_lines(&actual), vec![("/same", 1), ("/same", 3)]);
    }

    #[test]
    fn test_find_hrefs__multibyte_text_around_window() {
        let text = format!("{}\n<Card href=\"/ünïcode\" />", "é".repeat(300));
        let doc = Document::new("a.mdx", text);
        let actual = card_extractor().find_hrefs(&doc);

        assert_eq!(refs_and_lines(&actual), vec![("/ünïcode", 2)]);
    }

    #[test]
    fn test_extractor__custom_component_is_escaped() {
        let extractor = HrefExtractor::new("Link.Item").unwrap();
        let doc = Document::new("a.mdx", "<Link.Item href=\"/x\" />\n<LinkXItem href=\"/y\" />");

        assert_eq!(refs_and_lines(&extractor.find_hrefs(&doc)), vec![("/x", 1)]);
    }
}
