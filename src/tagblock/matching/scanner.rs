//! Scan a token sequence for the first accepted span

use serde::Serialize;

use crate::tagblock::pattern::PatternNode;
use crate::tagblock::token::Tagged;

use super::consume::Matcher;
use super::state::ResultState;

/// An accepted span `start..end` of the scanned tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub state: ResultState,
}

impl Match {
    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Matcher {
    /// Try every start offset, from 0 through `tokens.len()`, and return the first span whose
    /// match is a finished acceptance.
    ///
    /// `None` means no offset was accepted; offsets that only reached `Hungry` are not
    /// reported.
    pub fn find_match<T: Tagged>(&self, node: &PatternNode, tokens: &[T]) -> Option<Match> {
        (0..=tokens.len()).find_map(|start| {
            let outcome = self.consume(node, &tokens[start..]);
            outcome.state.is_accepted().then(|| Match {
                start,
                end: start + outcome.eaten,
                state: outcome.state,
            })
        })
    }
}

/// Scan `tokens` with the default matcher
pub fn find_match<T: Tagged>(node: &PatternNode, tokens: &[T]) -> Option<Match> {
    Matcher::default().find_match(node, tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagblock::pattern::compile;
    use crate::tagblock::testing::{front_block, tags};

    #[test]
    fn test_finds_front_block_inside_text() {
        let found = find_match(
            &front_block(),
            &tags("paragraph break0 field break1 paragraph"),
        )
        .unwrap();
        assert_eq!(found.span(), (1, 4));
        assert_eq!(found.state, ResultState::OverFull);
    }

    #[test]
    fn test_match_at_offset_zero() {
        let node = compile("heading").unwrap();
        let found = find_match(&node, &tags("heading blank")).unwrap();
        assert_eq!(found.span(), (0, 1));
        assert_eq!(found.state, ResultState::Full);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_no_match() {
        let node = compile("heading").unwrap();
        assert_eq!(find_match(&node, &tags("paragraph paragraph")), None);
        assert_eq!(find_match(&node, &tags("")), None);
    }

    #[test]
    fn test_hungry_is_not_reported() {
        let node = compile("heading,paragraph").unwrap();
        assert_eq!(find_match(&node, &tags("rule heading")), None);
    }

    #[test]
    fn test_star_accepts_empty_span() {
        let node = compile("*value").unwrap();
        let found = find_match(&node, &tags("paragraph")).unwrap();
        assert!(found.is_empty());
        assert_eq!(found.span(), (0, 0));
    }
}
