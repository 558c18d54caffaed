//! Tag Patterns
//!
//!     A tag pattern describes a multi-token structural block as a tree of operators over tags.
//!     Patterns are written as small programs in one of two surface syntaxes and compiled once
//!     into an immutable [`PatternNode`] tree.
//!
//! Long Form
//!
//!     One term per line, nesting by indentation. A line is one of:
//!
//!         word      match one token tagged `word`, then the line's children in sequence
//!         !word     match one token not tagged `word`, then the line's children in sequence
//!         |         match the first child that does not break
//!         *         zero or more passes over the children
//!         +         one or more passes over the children
//!
//!     Example, a front block with fields, indented continuations and slugs with values:
//!
//!         break0
//!         *
//!           |
//!             field
//!               *
//!                 |
//!                   indent
//!                   ndent
//!             slug
//!               +
//!                 value
//!         break1
//!
//! Short Form
//!
//!     Comma-separated terms on one line: `break0,*field|slug,break1`. A leading `*` or `+`
//!     quantifies the rest of the term, and `|` separates alternatives. Short form cannot
//!     attach children to a tag; anything it can say has a long-form twin that compiles to the
//!     same tree.
//!
//!     A program must use exactly one of the two forms.
//!
//! Renderings
//!
//!     Compiled trees render back to canonical long-form text ([`PatternNode::pattern`]) and to
//!     a character-level regular expression over tag codes ([`PatternNode::regexp`]). Neither
//!     is used for matching; they exist so hand-written programs can be checked against a
//!     known expected expression at startup.

pub mod compiler;
pub mod node;
pub mod render;

pub use compiler::compile;
pub use node::{Operator, PatternNode};
