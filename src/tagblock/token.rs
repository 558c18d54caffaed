//! Tags and tokens
//!
//!     A token is one classified input unit, usually one line of text. The matcher never looks
//!     at the text itself: it only sees the token's tag and whether the token is a boundary
//!     (an "empty" element such as a blank line).
//!
//!     Tags form a closed set known at compile time. Each tag has three spellings:
//!
//!         - its DSL name, used in pattern programs (`break0`, `field`, ...)
//!         - a one-character code, used by the character-level `regexp` rendering
//!         - a grammar string (`<break0>`), used in diagnostics and trace output

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    /// Empty or whitespace-only line
    Blank,

    /// Any line no other rule claims
    Paragraph,

    /// `#`-prefixed heading line
    Heading,

    /// Horizontal rule (`---`)
    Rule,

    /// Opening fence of a front block (`{{`)
    Break0,

    /// Closing fence of a front block (`}}`)
    Break1,

    /// `key: value` line
    Field,

    /// `key:` line whose value follows on the next lines
    Slug,

    /// `- item` line
    Value,

    /// Continuation line carried by indentation
    Indent,

    /// Continuation line carried by an explicit `| ` marker
    Ndent,
}

impl Tag {
    /// Every tag, in declaration order
    pub const ALL: [Tag; 11] = [
        Tag::Blank,
        Tag::Paragraph,
        Tag::Heading,
        Tag::Rule,
        Tag::Break0,
        Tag::Break1,
        Tag::Field,
        Tag::Slug,
        Tag::Value,
        Tag::Indent,
        Tag::Ndent,
    ];

    /// The name used for this tag in pattern programs
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Blank => "blank",
            Tag::Paragraph => "paragraph",
            Tag::Heading => "heading",
            Tag::Rule => "rule",
            Tag::Break0 => "break0",
            Tag::Break1 => "break1",
            Tag::Field => "field",
            Tag::Slug => "slug",
            Tag::Value => "value",
            Tag::Indent => "indent",
            Tag::Ndent => "ndent",
        }
    }

    /// One-character code standing for this tag in character-level regular expressions.
    ///
    /// Codes are unique across tags, so a token sequence maps one-to-one onto a string
    /// (see [`tags_to_code_string`]).
    pub fn code(&self) -> char {
        match self {
            Tag::Blank => '_',
            Tag::Paragraph => 'p',
            Tag::Heading => 'h',
            Tag::Rule => 'r',
            Tag::Break0 => '{',
            Tag::Break1 => '}',
            Tag::Field => 'f',
            Tag::Slug => 's',
            Tag::Value => 'v',
            Tag::Indent => 'i',
            Tag::Ndent => 'n',
        }
    }

    /// Format tag as grammar notation: `<name>`
    pub fn to_grammar_string(&self) -> String {
        format!("<{}>", self.name())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a name does not denote any [`Tag`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag(pub String);

impl fmt::Display for UnknownTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tag '{}'", self.0)
    }
}

impl std::error::Error for UnknownTag {}

impl FromStr for Tag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::ALL
            .iter()
            .copied()
            .find(|tag| tag.name() == s)
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

/// Anything the matcher can walk over.
///
/// The matcher only needs a tag and the boundary flag, so it runs equally on full
/// [`Token`]s and on bare [`Tag`] slices.
pub trait Tagged {
    fn tag(&self) -> Tag;

    fn is_boundary(&self) -> bool;
}

impl Tagged for Tag {
    fn tag(&self) -> Tag {
        *self
    }

    /// A bare tag is a boundary only if it is [`Tag::Blank`]
    fn is_boundary(&self) -> bool {
        matches!(self, Tag::Blank)
    }
}

impl<T: Tagged + ?Sized> Tagged for &T {
    fn tag(&self) -> Tag {
        (**self).tag()
    }

    fn is_boundary(&self) -> bool {
        (**self).is_boundary()
    }
}

/// A classified line of input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The classification of this line
    pub tag: Tag,

    /// The raw line text, without its line terminator
    pub text: String,

    /// Zero-based line number in the source
    pub line: usize,

    /// Whether this token is an empty/breaking element
    pub is_boundary: bool,
}

impl Token {
    pub fn new(tag: Tag, text: impl Into<String>, line: usize) -> Self {
        Token {
            tag,
            text: text.into(),
            line,
            is_boundary: tag == Tag::Blank,
        }
    }
}

impl Tagged for Token {
    fn tag(&self) -> Tag {
        self.tag
    }

    fn is_boundary(&self) -> bool {
        self.is_boundary
    }
}

/// Render a token sequence as the string of its tag codes.
///
/// This is the subject string the `regexp` rendering of a pattern is written against.
pub fn tags_to_code_string<T: Tagged>(tokens: &[T]) -> String {
    tokens.iter().map(|t| t.tag().code()).collect()
}

/// Render a token sequence in grammar notation, e.g. `<break0><field>`
pub fn tags_to_grammar_string<T: Tagged>(tokens: &[T]) -> String {
    tokens.iter().map(|t| t.tag().to_grammar_string()).collect()
}
