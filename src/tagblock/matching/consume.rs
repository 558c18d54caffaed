//! The consumption algorithm
//!
//! `consume` dispatches on the node's operator:
//!
//! - tag / negated tag: one token, then the node's children as a sequence
//! - sequence: children in order against what is left; any `Broken` breaks the whole node
//! - `|`: the first child that does not break, against the same unconsumed slice
//! - `*` / `+`: repeated passes over the children, looping iteratively

use tracing::trace;

use crate::tagblock::config::MatchingConfig;
use crate::tagblock::pattern::{Operator, PatternNode};
use crate::tagblock::token::{tags_to_grammar_string, Tag, Tagged};

use super::state::{Outcome, ResultState};

/// Evaluates compiled patterns against token slices.
///
/// A matcher holds no state besides its configuration; it is `Copy` and can be shared freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Matcher {
    trace: bool,
}

impl Matcher {
    pub fn new(config: &MatchingConfig) -> Self {
        Matcher {
            trace: config.trace,
        }
    }

    /// A matcher that logs every evaluation step at trace level
    pub fn tracing() -> Self {
        Matcher { trace: true }
    }

    pub fn is_tracing(&self) -> bool {
        self.trace
    }

    /// Match `node` against the start of `tokens`
    pub fn consume<T: Tagged>(&self, node: &PatternNode, tokens: &[T]) -> Outcome {
        self.eval(node, tokens, 0)
    }

    fn eval<T: Tagged>(&self, node: &PatternNode, tokens: &[T], depth: usize) -> Outcome {
        let outcome = match node.operator() {
            Operator::Tag(expected) => self.tag(node, tokens, depth, |tag| tag == expected),
            Operator::NotTag(forbidden) => self.tag(node, tokens, depth, |tag| tag != forbidden),
            Operator::Or => self.alternation(node, tokens, depth),
            Operator::Star | Operator::Plus => self.repeat(node, tokens, depth),
            Operator::Sequence => {
                self.sequence(node.children(), tokens, 0, ResultState::Halt, depth)
            }
        };

        if self.trace {
            let pad = "  ".repeat(depth);
            trace!(
                depth,
                eaten = outcome.eaten,
                state = ?outcome.state,
                "{}{} {} -> {} {:?}",
                pad,
                describe(node.operator()),
                tags_to_grammar_string(tokens),
                outcome.eaten,
                outcome.state,
            );
        }
        outcome
    }

    /// Leaf operators: decide on the first token, then continue with the children
    fn tag<T, F>(&self, node: &PatternNode, tokens: &[T], depth: usize, accepts: F) -> Outcome
    where
        T: Tagged,
        F: Fn(Tag) -> bool,
    {
        match tokens.first() {
            None => Outcome::hungry(0),
            Some(token) if !accepts(token.tag()) => Outcome::broken(),
            Some(_) => self.sequence(node.children(), tokens, 1, ResultState::Halt, depth),
        }
    }

    /// Run `children` in order starting at `tokens[eaten..]`.
    ///
    /// `eaten` tokens are already consumed by the caller and are folded into the total;
    /// `tentative` is reported when there are no children.
    fn sequence<T: Tagged>(
        &self,
        children: &[PatternNode],
        tokens: &[T],
        mut eaten: usize,
        tentative: ResultState,
        depth: usize,
    ) -> Outcome {
        let mut state = tentative;
        for child in children {
            let step = self.eval(child, &tokens[eaten..], depth + 1);
            match step.state {
                ResultState::Broken => return Outcome::broken(),
                ResultState::Hungry => return Outcome::hungry(eaten + step.eaten),
                accepted => {
                    eaten += step.eaten;
                    state = accepted;
                }
            }
        }

        if !children.is_empty() {
            if let Some(next) = tokens.get(eaten) {
                state = if next.is_boundary() {
                    ResultState::Full
                } else {
                    ResultState::OverFull
                };
            }
        }
        Outcome::new(eaten, state)
    }

    fn alternation<T: Tagged>(&self, node: &PatternNode, tokens: &[T], depth: usize) -> Outcome {
        node.children()
            .iter()
            .map(|child| self.eval(child, tokens, depth + 1))
            .find(|outcome| outcome.state != ResultState::Broken)
            .unwrap_or_else(Outcome::broken)
    }

    /// `*` and `+`: one pass runs every child in order; passes repeat while input remains
    fn repeat<T: Tagged>(&self, node: &PatternNode, tokens: &[T], depth: usize) -> Outcome {
        let mut total = 0;
        let mut passes = 0;
        let mut last = ResultState::Hungry;

        while total < tokens.len() {
            let pass = self.sequence(
                node.children(),
                &tokens[total..],
                0,
                ResultState::Okay,
                depth,
            );
            last = pass.state;
            match pass.state {
                ResultState::Broken => break,
                ResultState::Hungry => {
                    total += pass.eaten;
                    break;
                }
                _ => {
                    total += pass.eaten;
                    passes += 1;
                    // a pass that eats nothing would repeat forever
                    if pass.eaten == 0 {
                        break;
                    }
                }
            }
        }

        match node.operator() {
            Operator::Plus if passes == 0 => {
                if total == tokens.len() && last.is_okay_for_more() {
                    Outcome::hungry(total)
                } else {
                    Outcome::broken()
                }
            }
            _ => Outcome::new(total, ResultState::Okay),
        }
    }
}

fn describe(operator: Operator) -> String {
    match operator {
        Operator::Sequence => "(sequence)".to_string(),
        other => other.to_string(),
    }
}

/// Match `node` against the start of `tokens` with the default matcher
pub fn consume<T: Tagged>(node: &PatternNode, tokens: &[T]) -> Outcome {
    Matcher::default().consume(node, tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagblock::pattern::compile;
    use crate::tagblock::testing::{front_block, tags};
    use super::ResultState::*;

    fn run(program: &str, input: &str) -> (usize, ResultState) {
        let node = compile(program).unwrap();
        consume(&node, &tags(input)).into()
    }

    /// Consume with the root's first child, bypassing the root sequence
    fn run_first(program: &str, input: &str) -> (usize, ResultState) {
        let node = compile(program).unwrap();
        consume(&node.children()[0], &tags(input)).into()
    }

    #[test]
    fn test_tag_on_empty_input_is_hungry() {
        assert_eq!(run("field", ""), (0, Hungry));
    }

    #[test]
    fn test_tag_mismatch_is_broken() {
        assert_eq!(run("field", "slug"), (0, Broken));
    }

    #[test]
    fn test_tag_without_children_halts() {
        assert_eq!(run_first("field", "field slug"), (1, Halt));
        assert_eq!(run("field", "field"), (1, Halt));
    }

    #[test]
    fn test_leftover_after_root_is_overfull() {
        assert_eq!(run("field", "field slug"), (1, OverFull));
        assert_eq!(run("field", "field blank"), (1, Full));
    }

    #[test]
    fn test_negated_tag() {
        assert_eq!(run("!blank", "paragraph"), (1, Halt));
        assert_eq!(run("!blank", "blank"), (0, Broken));
        assert_eq!(run("!blank", ""), (0, Hungry));
    }

    #[test]
    fn test_sequence_reports_boundary_after_match() {
        assert_eq!(run("heading,paragraph", "heading paragraph blank"), (2, Full));
        assert_eq!(run("heading,paragraph", "heading paragraph rule"), (2, OverFull));
        assert_eq!(run("heading,paragraph", "heading paragraph"), (2, Halt));
    }

    #[test]
    fn test_sequence_short_circuits_on_broken() {
        assert_eq!(run("heading,paragraph,rule", "heading value rule"), (0, Broken));
    }

    #[test]
    fn test_sequence_stops_when_hungry() {
        assert_eq!(run("heading,paragraph,rule", "heading paragraph"), (2, Hungry));
        // a star after the starving child must not turn the result into an acceptance
        assert_eq!(run("heading,paragraph,*rule", "heading"), (1, Hungry));
    }

    #[test]
    fn test_tag_children_follow_the_tag() {
        assert_eq!(run("slug\n  +\n    value", "slug value value"), (3, Okay));
        assert_eq!(run("slug\n  +\n    value", "slug value blank"), (2, Full));
    }

    #[test]
    fn test_or_takes_first_non_broken() {
        assert_eq!(run("field|slug", "slug"), (1, Halt));
        assert_eq!(run("field|slug", "value"), (0, Broken));
        assert_eq!(run("field|slug", ""), (0, Hungry));
    }

    #[test]
    fn test_star() {
        assert_eq!(run_first("*value", ""), (0, Okay));
        assert_eq!(run_first("*value", "paragraph"), (0, Okay));
        assert_eq!(run_first("*value", "value value paragraph"), (2, Okay));
        // a starving pass still counts what it ate
        assert_eq!(run_first("*\n  value\n  indent", "value indent value"), (3, Okay));
    }

    #[test]
    fn test_plus() {
        assert_eq!(run_first("+value", ""), (0, Hungry));
        assert_eq!(run_first("+value", "paragraph"), (0, Broken));
        assert_eq!(run_first("+value", "value value paragraph"), (2, Okay));
        assert_eq!(run_first("+\n  value\n  indent", "value"), (1, Hungry));
        assert_eq!(run_first("+\n  value\n  indent", "value paragraph"), (0, Broken));
    }

    #[test]
    fn test_star_at_root_reports_leftover() {
        assert_eq!(run("*value", "paragraph"), (0, OverFull));
        assert_eq!(run("*value", "value blank"), (1, Full));
    }

    #[test]
    fn test_nested_star_does_not_loop_forever() {
        assert_eq!(run_first("*\n  *\n    value", "paragraph"), (0, Okay));
        assert_eq!(run_first("+\n  *\n    value", "paragraph"), (0, Okay));
    }

    #[test]
    fn test_front_block() {
        let node = front_block();
        let outcome = consume(&node, &tags("break0 field indent slug value value break1"));
        assert_eq!(outcome, Outcome::new(7, Halt));

        let outcome = consume(&node, &tags("break0 heading break1"));
        assert_eq!(outcome.state, Broken);
    }

    #[test]
    fn test_tracing_matcher_gives_same_outcome() {
        let node = front_block();
        let input = tags("break0 field ndent break1 blank");
        assert_eq!(
            Matcher::tracing().consume(&node, &input),
            Matcher::default().consume(&node, &input)
        );
    }

    #[test]
    fn test_matcher_from_config() {
        let matcher = Matcher::new(&MatchingConfig { trace: true });
        assert!(matcher.is_tracing());
        assert!(!Matcher::default().is_tracing());
    }
}
