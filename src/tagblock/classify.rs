//! Line Classification
//!
//! Turns raw text lines into [`Token`]s by assigning each line a [`Tag`].
//!
//! Classification is an ordered rule list: the first rule whose leaf pattern matches the line
//! decides the tag, and lines no rule claims become [`Tag::Paragraph`]. Order matters:
//!
//! 1. Blank lines
//! 2. Front block fences (`{{` / `}}`)
//! 3. Indented continuation lines
//! 4. Rules (`---`)
//! 5. Headings (`# Title`)
//! 6. Values (`- item`)
//! 7. Explicit continuations (`| text`)
//! 8. Slugs (`key:`)
//! 9. Fields (a colon followed by whitespace, `key: value`)
//! 10. Default to paragraph

use once_cell::sync::Lazy;

use crate::tagblock::config::ClassifyConfig;
use crate::tagblock::leaf::{LeafPattern, Position};
use crate::tagblock::token::{Tag, Token};

static BLANK: Lazy<LeafPattern> = Lazy::new(|| LeafPattern::regex(r"\s*").unwrap());
static RULE: Lazy<LeafPattern> = Lazy::new(|| LeafPattern::regex(r"-{3,}\s*").unwrap());
static HEADING: Lazy<LeafPattern> = Lazy::new(|| LeafPattern::regex(r"#{1,6}\s+\S.*").unwrap());
static SLUG: Lazy<LeafPattern> =
    Lazy::new(|| LeafPattern::regex(r"[A-Za-z][A-Za-z0-9_-]*:\s*").unwrap());

/// A single classification rule
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: LeafPattern,
    pub tag: Tag,
}

impl Rule {
    pub fn new(pattern: LeafPattern, tag: Tag) -> Self {
        Rule { pattern, tag }
    }
}

/// Assigns tags to raw lines using an ordered rule list
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    pub fn new(rules: Vec<Rule>) -> Self {
        Classifier { rules }
    }

    /// The standard rule set for the front-block markup
    pub fn standard(config: &ClassifyConfig) -> Self {
        Classifier::new(vec![
            Rule::new(BLANK.clone(), Tag::Blank),
            Rule::new(LeafPattern::exact("{{"), Tag::Break0),
            Rule::new(LeafPattern::exact("}}"), Tag::Break1),
            Rule::new(LeafPattern::indented(config.indent_width), Tag::Indent),
            Rule::new(RULE.clone(), Tag::Rule),
            Rule::new(HEADING.clone(), Tag::Heading),
            Rule::new(LeafPattern::prefix("- "), Tag::Value),
            Rule::new(LeafPattern::prefix("| "), Tag::Ndent),
            Rule::new(SLUG.clone(), Tag::Slug),
            Rule::new(LeafPattern::inline(":", Position::RightClear), Tag::Field),
        ])
    }

    /// Determine the tag of one line
    pub fn classify_line(&self, line: &str) -> Tag {
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(line))
            .map_or(Tag::Paragraph, |rule| rule.tag)
    }

    /// Classify every line of `source`.
    ///
    /// Line terminators (`\n` and `\r\n`) are stripped from the token text.
    pub fn classify(&self, source: &str) -> Vec<Token> {
        source
            .lines()
            .enumerate()
            .map(|(line, text)| Token::new(self.classify_line(text), text, line))
            .collect()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::standard(&ClassifyConfig::default())
    }
}
