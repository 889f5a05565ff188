//! Case-insensitive substring matching and highlight spans
//!
//! Matching folds both sides with `char::to_lowercase` and looks for plain
//! substrings; there is no pattern syntax. Highlight ranges are reported as
//! byte ranges into the original text, always on char boundaries.

use std::ops::Range;

/// Lowercased text plus, for every byte of it, the byte offset of the
/// source char that produced it
struct Folded {
    text: String,
    origin: Vec<usize>,
}

impl Folded {
    fn new(source: &str) -> Self {
        let mut text = String::with_capacity(source.len());
        let mut origin = Vec::with_capacity(source.len());
        for (offset, ch) in source.char_indices() {
            for lower in ch.to_lowercase() {
                text.push(lower);
                origin.resize(text.len(), offset);
            }
        }
        Self { text, origin }
    }

    /// Map a byte offset in the folded text back to the source
    fn source_offset(&self, folded: usize, source_len: usize) -> usize {
        self.origin.get(folded).copied().unwrap_or(source_len)
    }
}

/// Whether `haystack` contains `needle`, ignoring case
///
/// # Examples
/// ```
/// # use taxonav::search::highlight::contains_ignore_case;
/// assert!(contains_ignore_case("Income Tax records", "tax"));
/// assert!(!contains_ignore_case("Corporate and business records", "tax"));
/// ```
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    Folded::new(haystack).text.contains(&Folded::new(needle).text)
}

/// Non-overlapping, left-to-right match ranges of `query` in `text`
///
/// An empty query yields no ranges.
#[must_use]
pub fn match_ranges(text: &str, query: &str) -> Vec<Range<usize>> {
    let needle = Folded::new(query).text;
    if needle.is_empty() {
        return Vec::new();
    }

    let folded = Folded::new(text);
    folded
        .text
        .match_indices(&needle)
        .map(|(start, matched)| {
            folded.source_offset(start, text.len())..folded.source_offset(start + matched.len(), text.len())
        })
        .filter(|range| !range.is_empty())
        .collect()
}

/// A run of display text, either emphasized or plain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

impl<'a> Segment<'a> {
    #[must_use]
    pub const fn plain(text: &'a str) -> Self {
        Self {
            text,
            matched: false,
        }
    }

    #[must_use]
    pub const fn matched(text: &'a str) -> Self {
        Self {
            text,
            matched: true,
        }
    }
}

/// Split `text` into plain and emphasized segments for `query`
///
/// A blank query disables highlighting: the whole text comes back as one
/// plain segment.
///
/// # Examples
/// ```
/// # use taxonav::search::highlight::{highlight, Segment};
/// assert_eq!(
///     highlight("Tax assessments", "tax"),
///     vec![Segment::matched("Tax"), Segment::plain(" assessments")]
/// );
/// ```
#[must_use]
pub fn highlight<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    if text.is_empty() {
        return Vec::new();
    }
    if super::is_blank(query) {
        return vec![Segment::plain(text)];
    }

    let mut segments = Vec::new();
    let mut cursor = 0;
    for range in match_ranges(text, query) {
        if range.start > cursor {
            segments.push(Segment::plain(&text[cursor..range.start]));
        }
        segments.push(Segment::matched(&text[range.clone()]));
        cursor = range.end;
    }
    if cursor < text.len() {
        segments.push(Segment::plain(&text[cursor..]));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignores_case() {
        assert!(contains_ignore_case("Tax records", "TAX"));
        assert!(contains_ignore_case("Payroll tax records", "Tax"));
        assert!(!contains_ignore_case("Payroll registers", "tax"));
    }

    #[test]
    fn test_every_occurrence_is_highlighted() {
        let segments = highlight("Tax withholding tax", "tax");
        assert_eq!(
            segments,
            vec![
                Segment::matched("Tax"),
                Segment::plain(" withholding "),
                Segment::matched("tax"),
            ]
        );
    }

    #[test]
    fn test_matches_do_not_overlap() {
        assert_eq!(match_ranges("aaaa", "aa"), vec![0..2, 2..4]);
        assert_eq!(match_ranges("aaa", "aa"), vec![0..2]);
    }

    #[test]
    fn test_blank_query_disables_highlighting() {
        assert_eq!(highlight("Tax records", ""), vec![Segment::plain("Tax records")]);
        assert_eq!(highlight("Tax records", "   "), vec![Segment::plain("Tax records")]);
    }

    #[test]
    fn test_query_is_not_a_pattern() {
        assert_eq!(
            highlight("Human Resources (HR) records", "(hr)"),
            vec![
                Segment::plain("Human Resources "),
                Segment::matched("(HR)"),
                Segment::plain(" records"),
            ]
        );
        assert!(match_ranges("Tax records", ".*").is_empty());
    }

    #[test]
    fn test_ranges_land_on_char_boundaries() {
        let text = "Ärzte und ÄRZTE";
        let ranges = match_ranges(text, "ärzte");
        assert_eq!(ranges.len(), 2);
        for range in ranges {
            assert!(text.is_char_boundary(range.start));
            assert!(text.is_char_boundary(range.end));
            assert!(text[range].to_lowercase() == "ärzte");
        }
    }

    #[test]
    fn test_segments_reassemble_original() {
        let text = "Contracts, contract performance, remedies";
        let joined: String = highlight(text, "contract").iter().map(|s| s.text).collect();
        assert_eq!(joined, text);
    }
}
