//! Block Grouping
//!
//!     Splits a stream of classified tokens into structural blocks using a compiled
//!     [`Registry`]. Tokens arrive one at a time; the grouper buffers them and emits a block
//!     as soon as the decision at the head of the buffer can no longer change.
//!
//! Decision at the buffer head
//!
//!     Blocks are tried in registration order against the whole buffer:
//!
//!         1. A block that ran to the end of the buffer and could still grow (`Hungry` or
//!            `Okay`) makes the grouper wait for more tokens, because it has priority over
//!            every block after it.
//!         2. Otherwise the first block with a finished acceptance that ate at least one
//!            token is emitted.
//!         3. If no block accepts, the head token is emitted alone as an `unmatched` block.
//!
//!     At end of input ([`BlockGrouper::finish`]) nothing waits any more: a block that is
//!     still `Hungry` has failed, and an `Okay` block is taken as it stands. The same happens
//!     early when the buffer reaches the configured `max_window`.

use serde::Serialize;
use tracing::{debug, trace};

use crate::tagblock::config::TagblockConfig;
use crate::tagblock::matching::{Matcher, Outcome, ResultState};
use crate::tagblock::registry::Registry;
use crate::tagblock::token::Tagged;

/// Name given to single tokens no block accepts
pub const UNMATCHED: &str = "unmatched";

/// A grouped span of the token stream, `start..end` in stream positions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub name: String,
    pub start: usize,
    pub end: usize,
    pub state: ResultState,
}

impl Block {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_unmatched(&self) -> bool {
        self.name == UNMATCHED
    }
}

/// What to do with the current buffer
#[derive(Debug, Clone, PartialEq, Eq)]
enum Decision {
    Wait,
    Emit { name: String, outcome: Outcome },
    Unmatched,
}

/// Incremental block grouper over a compiled registry
#[derive(Debug)]
pub struct BlockGrouper<'r, T> {
    registry: &'r Registry,
    matcher: Matcher,
    max_window: usize,
    buffer: Vec<T>,
    /// Stream position of `buffer[0]`
    offset: usize,
}

impl<'r, T: Tagged> BlockGrouper<'r, T> {
    pub fn new(registry: &'r Registry, config: &TagblockConfig) -> Self {
        BlockGrouper {
            registry,
            matcher: Matcher::new(&config.matching),
            max_window: config.grouping.max_window.max(1),
            buffer: Vec::new(),
            offset: 0,
        }
    }

    /// Tokens received but not yet emitted as part of a block
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed one token; returns the blocks this token allowed to be decided
    pub fn push(&mut self, token: T) -> Vec<Block> {
        self.buffer.push(token);
        self.drain(false)
    }

    /// Signal end of input and emit everything still buffered
    pub fn finish(mut self) -> Vec<Block> {
        self.drain(true)
    }

    fn drain(&mut self, at_end: bool) -> Vec<Block> {
        let mut blocks = Vec::new();
        while !self.buffer.is_empty() {
            let final_decision = at_end || self.buffer.len() >= self.max_window;
            let (name, eaten, state) = match self.decide(final_decision) {
                Decision::Wait => {
                    trace!(pending = self.buffer.len(), "waiting for more tokens");
                    break;
                }
                Decision::Emit { name, outcome } => (name, outcome.eaten, outcome.state),
                Decision::Unmatched => (UNMATCHED.to_string(), 1, ResultState::Broken),
            };

            let block = Block {
                name,
                start: self.offset,
                end: self.offset + eaten,
                state,
            };
            debug!(
                block = %block.name,
                start = block.start,
                end = block.end,
                state = ?block.state,
                "grouped block"
            );
            self.buffer.drain(..eaten);
            self.offset += eaten;
            blocks.push(block);
        }
        blocks
    }

    fn decide(&self, final_decision: bool) -> Decision {
        for block in self.registry.blocks() {
            let outcome = self.matcher.consume(block.node(), &self.buffer);
            let open_ended =
                outcome.state.is_okay_for_more() && outcome.eaten == self.buffer.len();
            if open_ended && !final_decision {
                return Decision::Wait;
            }
            if outcome.state.is_accepted() && outcome.eaten > 0 {
                return Decision::Emit {
                    name: block.name().to_string(),
                    outcome,
                };
            }
        }
        Decision::Unmatched
    }
}

/// Group a complete token sequence
pub fn group_tokens<T: Tagged>(
    registry: &Registry,
    tokens: &[T],
    config: &TagblockConfig,
) -> Vec<Block> {
    let mut grouper = BlockGrouper::new(registry, config);
    let mut blocks = Vec::new();
    for token in tokens {
        blocks.extend(grouper.push(token));
    }
    blocks.extend(grouper.finish());
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagblock::testing::tags;

    fn group(input: &str) -> Vec<(String, usize, usize)> {
        let registry = Registry::standard().unwrap();
        group_tokens(&registry, &tags(input), &TagblockConfig::default())
            .into_iter()
            .map(|b| (b.name, b.start, b.end))
            .collect()
    }

    fn named(blocks: &[(&str, usize, usize)]) -> Vec<(String, usize, usize)> {
        blocks
            .iter()
            .map(|(name, start, end)| (name.to_string(), *start, *end))
            .collect()
    }

    #[test]
    fn test_groups_front_block_and_paragraph() {
        assert_eq!(
            group("break0 field indent slug value break1 blank paragraph paragraph"),
            named(&[
                ("front", 0, 6),
                ("blank", 6, 7),
                ("paragraph", 7, 9),
            ])
        );
    }

    #[test]
    fn test_unterminated_front_block_falls_back() {
        // no closing fence: the front block stays hungry and fails at end of input
        assert_eq!(
            group("break0 field"),
            named(&[("unmatched", 0, 1), ("definition", 1, 2)])
        );
    }

    #[test]
    fn test_headings_split_paragraphs() {
        assert_eq!(
            group("heading paragraph indent heading rule"),
            named(&[
                ("heading", 0, 1),
                ("paragraph", 1, 3),
                ("heading", 3, 4),
                ("rule", 4, 5),
            ])
        );
    }

    #[test]
    fn test_streaming_waits_for_open_blocks() {
        let registry = Registry::standard().unwrap();
        let mut grouper = BlockGrouper::new(&registry, &TagblockConfig::default());

        assert!(grouper.push(tags("paragraph")[0]).is_empty());
        assert!(grouper.push(tags("paragraph")[0]).is_empty());
        assert_eq!(grouper.pending(), 2);

        let blocks = grouper.push(tags("blank")[0]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].name, "paragraph");
        assert_eq!((blocks[0].start, blocks[0].end), (0, 2));
        assert_eq!(blocks[0].state, ResultState::Full);

        let rest = grouper.finish();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].name, "blank");
    }

    #[test]
    fn test_max_window_forces_a_decision() {
        let registry = Registry::standard().unwrap();
        let mut config = TagblockConfig::default();
        config.grouping.max_window = 2;
        let mut grouper = BlockGrouper::new(&registry, &config);

        assert!(grouper.push(tags("value")[0]).is_empty());
        let blocks = grouper.push(tags("value")[0]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].name, "list");
        assert_eq!(blocks[0].len(), 2);
        assert_eq!(grouper.pending(), 0);
    }

    #[test]
    fn test_empty_input() {
        assert!(group("").is_empty());
    }
}
