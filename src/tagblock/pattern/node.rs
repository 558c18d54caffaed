//! Compiled pattern tree

use std::fmt;

use crate::tagblock::token::{Tag, UnknownTag};

/// What a pattern node does when evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Plain ordered sequence of the children. Only the root carries it.
    Sequence,
    /// One token with this tag, then the children in sequence
    Tag(Tag),
    /// One token with any other tag, then the children in sequence
    NotTag(Tag),
    /// First child that does not break
    Or,
    /// Zero or more passes over the children
    Star,
    /// One or more passes over the children
    Plus,
}

impl Operator {
    /// Parse the text of one long-form line
    pub fn parse(text: &str) -> Result<Operator, UnknownTag> {
        match text {
            "|" => Ok(Operator::Or),
            "*" => Ok(Operator::Star),
            "+" => Ok(Operator::Plus),
            _ => match text.strip_prefix('!') {
                Some(name) => name.parse().map(Operator::NotTag),
                None => text.parse().map(Operator::Tag),
            },
        }
    }

    /// Operators that are meaningless without children
    pub fn needs_operands(&self) -> bool {
        matches!(self, Operator::Or | Operator::Star | Operator::Plus)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Sequence => Ok(()),
            Operator::Tag(tag) => write!(f, "{tag}"),
            Operator::NotTag(tag) => write!(f, "!{tag}"),
            Operator::Or => f.write_str("|"),
            Operator::Star => f.write_str("*"),
            Operator::Plus => f.write_str("+"),
        }
    }
}

/// A node of a compiled pattern.
///
/// Trees are only built by the compiler and never change afterwards, so one compiled tree can
/// be shared across any number of concurrent match attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternNode {
    operator: Operator,
    children: Vec<PatternNode>,
    /// Nesting depth: -1 for the root, 0 for its children, and so on
    indent: i32,
}

impl PatternNode {
    pub(crate) fn new(operator: Operator, children: Vec<PatternNode>) -> Self {
        PatternNode {
            operator,
            children,
            indent: 0,
        }
    }

    /// Renumber depths so the root sits at -1 and each level adds one
    pub(crate) fn finalize(mut self) -> Self {
        self.renumber(-1);
        self
    }

    fn renumber(&mut self, indent: i32) {
        self.indent = indent;
        for child in &mut self.children {
            child.renumber(indent + 1);
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn children(&self) -> &[PatternNode] {
        &self.children
    }

    pub fn indent(&self) -> i32 {
        self.indent
    }

    /// Total number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(PatternNode::node_count).sum::<usize>()
    }

    /// Deepest level of nesting below this node
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for PatternNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern())
    }
}
