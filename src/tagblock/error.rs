//! Error types
//!
//! Only compilation can fail. A pattern that does not match is not an error: matching
//! reports `Broken` or `Hungry` as plain data (see [`crate::tagblock::matching`]).

use thiserror::Error;

/// Errors raised while compiling a pattern program.
///
/// Line numbers are 1-based and refer to the long-form text (after short-form expansion
/// when the program was written in short form).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("pattern program is empty")]
    Empty,

    #[error("pattern program mixes short-form (',') and long-form (newline) syntax")]
    MixedSyntax,

    #[error("empty term at position {position} of short-form program")]
    EmptyTerm { position: usize },

    #[error("line {line}: only spaces are allowed in indentation")]
    NonSpaceIndentation { line: usize },

    #[error("line {line}: indentation {found} is smaller than the first line's {minimum}")]
    InconsistentIndent {
        line: usize,
        found: usize,
        minimum: usize,
    },

    #[error("line {line}: indentation {found} does not line up with its siblings at {expected}")]
    UnalignedIndent {
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error("line {line}: unknown tag '{name}'")]
    UnknownTag { line: usize, name: String },

    #[error("line {line}: operator '{operator}' has no operands")]
    MissingOperand { line: usize, operator: String },
}

/// Errors raised while building the block registry at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("block '{name}' failed to compile: {source}")]
    Compile {
        name: String,
        #[source]
        source: CompileError,
    },

    #[error("block '{name}' compiled to regexp {actual:?}, expected {expected:?}")]
    SelfCheck {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("block '{name}' renders an invalid regular expression: {message}")]
    InvalidRegexp { name: String, message: String },

    #[error("block '{0}' is registered twice")]
    Duplicate(String),
}
