//! Leaf String Patterns
//!
//!     Small matchers over the raw text of a single line. They are what the classifier uses to
//!     decide which tag a line gets; the tag-pattern engine itself never sees text.
//!
//!     Every variant answers the same question: where, if anywhere, does this pattern match in
//!     `text`? Line-level variants (exact, prefix, regex, indented) report the span they cover
//!     starting at 0; the inline variant reports the span of the accepted needle occurrence.

use std::ops::Range;

use regex::Regex;

/// Placement requirement for an inline match.
///
/// A side is "clear" when it is the edge of the buffer or a whitespace character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// No constraint
    Any,
    /// Nothing but whitespace (or the buffer start) immediately to the left
    LeftClear,
    /// Nothing but whitespace (or the buffer end) immediately to the right
    RightClear,
    /// Both sides clear
    BothClear,
    /// Must start at offset 0
    Start,
    /// Must end at the end of the buffer
    End,
}

impl Position {
    fn accepts(&self, text: &str, span: &Range<usize>) -> bool {
        let left_clear = text[..span.start]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace);
        let right_clear = text[span.end..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace);

        match self {
            Position::Any => true,
            Position::LeftClear => left_clear,
            Position::RightClear => right_clear,
            Position::BothClear => left_clear && right_clear,
            Position::Start => span.start == 0,
            Position::End => span.end == text.len(),
        }
    }
}

/// A matcher over one line of raw text
#[derive(Debug, Clone)]
pub enum LeafPattern {
    /// Whole text equals the string
    Exact(String),

    /// Text starts with the string
    Prefix(String),

    /// Whole text matches the expression. Compiled once, at construction.
    Regex(Regex),

    /// Text starts with at least `min_width` whitespace characters and has content after them
    Indented { min_width: usize },

    /// Some occurrence of `needle` satisfies `position`
    Inline { needle: String, position: Position },
}

impl LeafPattern {
    pub fn exact(text: impl Into<String>) -> Self {
        LeafPattern::Exact(text.into())
    }

    pub fn prefix(text: impl Into<String>) -> Self {
        LeafPattern::Prefix(text.into())
    }

    /// Compile a full-match regular expression.
    ///
    /// The expression is anchored on both ends, so `a+` only matches texts made entirely of `a`.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Ok(LeafPattern::Regex(Regex::new(&format!("^(?:{pattern})$"))?))
    }

    pub fn indented(min_width: usize) -> Self {
        LeafPattern::Indented { min_width }
    }

    pub fn inline(needle: impl Into<String>, position: Position) -> Self {
        LeafPattern::Inline {
            needle: needle.into(),
            position,
        }
    }

    /// Find the span this pattern matches in `text`, if any
    pub fn find_match(&self, text: &str) -> Option<Range<usize>> {
        match self {
            LeafPattern::Exact(expected) => (text == expected).then(|| 0..text.len()),
            LeafPattern::Prefix(prefix) => text.starts_with(prefix.as_str()).then(|| 0..prefix.len()),
            LeafPattern::Regex(re) => re.find(text).map(|m| m.range()),
            LeafPattern::Indented { min_width } => {
                let width = text.chars().take_while(|c| c.is_whitespace()).count();
                (width >= *min_width && width < text.chars().count()).then(|| 0..text.len())
            }
            LeafPattern::Inline { needle, position } => {
                if needle.is_empty() {
                    return None;
                }
                // every start is a candidate, overlapping occurrences included
                text.char_indices()
                    .map(|(start, _)| start)
                    .filter(|&start| text[start..].starts_with(needle.as_str()))
                    .map(|start| start..start + needle.len())
                    .find(|span| position.accepts(text, span))
            }
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.find_match(text).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact() {
        let p = LeafPattern::exact("{{");
        assert_eq!(p.find_match("{{"), Some(0..2));
        assert_eq!(p.find_match("{{ "), None);
    }

    #[test]
    fn test_prefix() {
        let p = LeafPattern::prefix("- ");
        assert_eq!(p.find_match("- item"), Some(0..2));
        assert_eq!(p.find_match("-item"), None);
    }

    #[test]
    fn test_regex_is_full_match() {
        let p = LeafPattern::regex("-{3,}").unwrap();
        assert_eq!(p.find_match("----"), Some(0..4));
        assert_eq!(p.find_match("---x"), None);
        assert_eq!(p.find_match("x---"), None);
    }

    #[test]
    fn test_regex_rejects_bad_expression() {
        assert!(LeafPattern::regex("(").is_err());
    }

    #[test]
    fn test_indented() {
        let p = LeafPattern::indented(2);
        assert!(p.is_match("  text"));
        assert!(p.is_match("\t\tmore"));
        assert!(!p.is_match(" text"));
        // whitespace-only lines are blank, not indented
        assert!(!p.is_match("    "));
    }

    #[test]
    fn test_inline_positions() {
        let any = LeafPattern::inline(":", Position::Any);
        assert_eq!(any.find_match("http://x"), Some(4..5));

        let right = LeafPattern::inline(":", Position::RightClear);
        assert_eq!(right.find_match("http://x"), None);
        assert_eq!(right.find_match("key: value"), Some(3..4));
        assert_eq!(right.find_match("a:b key:"), Some(7..8));

        let left = LeafPattern::inline("*", Position::LeftClear);
        assert_eq!(left.find_match("a*b *c"), Some(4..5));

        let both = LeafPattern::inline("--", Position::BothClear);
        assert_eq!(both.find_match("a--b -- c"), Some(5..7));

        let start = LeafPattern::inline("ab", Position::Start);
        assert_eq!(start.find_match("abab"), Some(0..2));
        assert_eq!(start.find_match("xab"), None);

        let end = LeafPattern::inline("ab", Position::End);
        assert_eq!(end.find_match("abab"), Some(2..4));
    }

    #[test]
    fn test_inline_overlapping_candidates() {
        let right = LeafPattern::inline("--", Position::RightClear);
        assert_eq!(right.find_match("--- x"), Some(1..3));

        let end = LeafPattern::inline("aa", Position::End);
        assert_eq!(end.find_match("aaa"), Some(1..3));
    }

    #[test]
    fn test_inline_empty_needle_never_matches() {
        assert_eq!(LeafPattern::inline("", Position::Any).find_match("abc"), None);
    }
}
