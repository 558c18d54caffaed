//! Property-based tests for the matcher
//!
//! Random tag sequences are run against a fixed set of programs covering every operator.
//! The properties hold for any input: results are deterministic, never claim more tokens than
//! exist, and scanning only reports spans that `consume` accepts on its own.

use proptest::prelude::*;
use tagblock::tagblock::matching::{consume, find_match, Matcher, ResultState};
use tagblock::tagblock::pattern::{Operator, PatternNode};
use tagblock::tagblock::registry::FRONT_BLOCK;
use tagblock::tagblock::testing::compiled;
use tagblock::tagblock::token::Tag;

const PROGRAMS: &[&str] = &[
    FRONT_BLOCK,
    "heading",
    "!blank,paragraph",
    "field|slug,*indent|ndent|value",
    "*value|indent",
    "+blank",
    "+\n  slug\n  value",
    "*\n  *\n    paragraph",
];

fn tag_strategy() -> impl Strategy<Value = Tag> {
    prop::sample::select(Tag::ALL.to_vec())
}

fn tags_strategy() -> impl Strategy<Value = Vec<Tag>> {
    prop::collection::vec(tag_strategy(), 0..16)
}

fn program_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(PROGRAMS.to_vec())
}

/// Every node of the tree, root first
fn all_nodes(node: &PatternNode) -> Vec<&PatternNode> {
    let mut nodes = vec![node];
    for child in node.children() {
        nodes.extend(all_nodes(child));
    }
    nodes
}

proptest! {
    #[test]
    fn test_consume_is_deterministic(program in program_strategy(), input in tags_strategy()) {
        let node = compiled(program);
        prop_assert_eq!(consume(&node, &input), consume(&node, &input));
        prop_assert_eq!(
            Matcher::tracing().consume(&node, &input),
            consume(&node, &input)
        );
    }

    #[test]
    fn test_eaten_never_exceeds_input(program in program_strategy(), input in tags_strategy()) {
        let node = compiled(program);
        for sub in all_nodes(&node) {
            let outcome = consume(sub, &input);
            prop_assert!(outcome.eaten <= input.len());
            if outcome.state == ResultState::Broken {
                prop_assert_eq!(outcome.eaten, 0);
            }
        }
    }

    #[test]
    fn test_star_never_rejects(program in program_strategy(), input in tags_strategy()) {
        let node = compiled(program);
        for sub in all_nodes(&node) {
            if sub.operator() == Operator::Star {
                let state = consume(sub, &input).state;
                prop_assert!(
                    matches!(state, ResultState::Okay | ResultState::Hungry),
                    "star gave {:?}",
                    state
                );
            }
        }
    }

    #[test]
    fn test_find_match_reports_consumed_spans(
        program in program_strategy(),
        input in tags_strategy(),
    ) {
        let node = compiled(program);
        if let Some(found) = find_match(&node, &input) {
            prop_assert!(found.start <= found.end);
            prop_assert!(found.end <= input.len());
            prop_assert!(found.state.is_accepted());

            let outcome = consume(&node, &input[found.start..]);
            prop_assert_eq!(outcome.eaten, found.len());
            prop_assert_eq!(outcome.state, found.state);

            for start in 0..found.start {
                prop_assert!(!consume(&node, &input[start..]).state.is_accepted());
            }
        }
    }
}
