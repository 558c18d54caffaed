//! Pattern renderings
//!
//! Two views of a compiled tree, both for self-checking:
//!
//! - `pattern`: canonical long-form text. Compiling it again yields the same tree.
//! - `regexp`: a character-level regular expression over tag codes (see [`Tag::code`]):
//!   sequences concatenate, `|` becomes a parenthesized alternation, `*`/`+` quantify the
//!   parenthesized concatenation of their children, and a tag becomes its escaped code.
//!
//! [`Tag::code`]: crate::tagblock::token::Tag::code

use regex::Regex;

use super::node::{Operator, PatternNode};

const INDENT: &str = "  ";

impl PatternNode {
    /// Canonical long-form program text for this tree
    pub fn pattern(&self) -> String {
        let mut lines = Vec::new();
        self.push_pattern_lines(&mut lines);
        lines.join("\n")
    }

    fn push_pattern_lines(&self, lines: &mut Vec<String>) {
        if self.operator() != Operator::Sequence {
            let depth = usize::try_from(self.indent()).unwrap_or(0);
            lines.push(format!("{}{}", INDENT.repeat(depth), self.operator()));
        }
        for child in self.children() {
            child.push_pattern_lines(lines);
        }
    }

    /// Character-level regular expression equivalent of this tree
    pub fn regexp(&self) -> String {
        let concat = || -> String { self.children().iter().map(PatternNode::regexp).collect() };
        match self.operator() {
            Operator::Sequence => concat(),
            Operator::Tag(tag) => format!("{}{}", regex::escape(&tag.code().to_string()), concat()),
            Operator::NotTag(tag) => {
                format!("[^{}]{}", regex::escape(&tag.code().to_string()), concat())
            }
            Operator::Or => {
                let alternatives: Vec<String> =
                    self.children().iter().map(PatternNode::regexp).collect();
                format!("({})", alternatives.join("|"))
            }
            Operator::Star => format!("({})*", concat()),
            Operator::Plus => format!("({})+", concat()),
        }
    }

    /// Compile [`regexp`](Self::regexp) anchored at the start of the subject string.
    ///
    /// Subjects are tag-code strings as built by
    /// [`tags_to_code_string`](crate::tagblock::token::tags_to_code_string).
    pub fn to_regex(&self) -> Result<Regex, regex::Error> {
        Regex::new(&format!("^(?:{})", self.regexp()))
    }
}
