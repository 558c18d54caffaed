//! Testing utilities
//!
//!     Factories shared by the unit tests and the integration tests under `tests/`.
//!
//!     Token sequences are written as space-separated tag names, the same names pattern
//!     programs use:
//!
//!         tags("break0 field indent break1")
//!
//!     Keep test inputs in this form rather than building `Tag` vectors by hand; it reads like
//!     the patterns being tested and fails loudly on a misspelled tag.

use crate::tagblock::pattern::{compile, PatternNode};
use crate::tagblock::registry::FRONT_BLOCK;
use crate::tagblock::token::{Tag, Token};

/// Parse space-separated tag names. Panics on an unknown name.
pub fn tags(input: &str) -> Vec<Tag> {
    input
        .split_whitespace()
        .map(|name| {
            name.parse()
                .unwrap_or_else(|e| panic!("bad tag in test input {input:?}: {e}"))
        })
        .collect()
}

/// Build tokens from space-separated tag names, one line per token
pub fn tokens(input: &str) -> Vec<Token> {
    tags(input)
        .into_iter()
        .enumerate()
        .map(|(line, tag)| Token::new(tag, tag.name(), line))
        .collect()
}

/// Compile a program that is known to be valid. Panics otherwise.
pub fn compiled(program: &str) -> PatternNode {
    compile(program).unwrap_or_else(|e| panic!("pattern {program:?} failed to compile: {e}"))
}

/// The compiled front-block pattern
pub fn front_block() -> PatternNode {
    compiled(FRONT_BLOCK)
}
