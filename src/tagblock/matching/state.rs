//! Match result lattice

use serde::Serialize;

/// How a match attempt ended.
///
/// `Broken` is a final rejection and `Hungry` means the input ran out before a decision.
/// The other four are acceptances of different quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultState {
    /// Never matches here, no matter how much input follows
    Broken,
    /// Input exhausted before a decision; retry with a longer buffer
    Hungry,
    /// Provisionally accepted, more could still be consumed
    Okay,
    /// Accepted, and the node is done
    Halt,
    /// Accepted, and the next token is a boundary
    Full,
    /// Accepted, but followed by further non-boundary tokens
    OverFull,
}

impl ResultState {
    /// States after which feeding more input may change the outcome
    pub const OKAY_FOR_MORE: [ResultState; 2] = [ResultState::Hungry, ResultState::Okay];

    /// States describing a chunk that is matched so far
    pub const ACCEPTED_CHUNK: [ResultState; 3] =
        [ResultState::Hungry, ResultState::Okay, ResultState::Halt];

    /// Finished acceptances, best first
    pub const COLLAPSE_ORDER: [ResultState; 4] = [
        ResultState::Halt,
        ResultState::Full,
        ResultState::OverFull,
        ResultState::Okay,
    ];

    pub fn is_okay_for_more(self) -> bool {
        Self::OKAY_FOR_MORE.contains(&self)
    }

    pub fn is_accepted_chunk(self) -> bool {
        Self::ACCEPTED_CHUNK.contains(&self)
    }

    /// Position in [`COLLAPSE_ORDER`](Self::COLLAPSE_ORDER); lower is better
    pub fn collapse_rank(self) -> Option<usize> {
        Self::COLLAPSE_ORDER.iter().position(|s| *s == self)
    }

    /// Whether this is a finished acceptance
    pub fn is_accepted(self) -> bool {
        self.collapse_rank().is_some()
    }

    /// The best finished acceptance among `states`, if any
    pub fn collapse<I>(states: I) -> Option<ResultState>
    where
        I: IntoIterator<Item = ResultState>,
    {
        states
            .into_iter()
            .filter_map(|s| s.collapse_rank().map(|rank| (rank, s)))
            .min_by_key(|(rank, _)| *rank)
            .map(|(_, s)| s)
    }
}

/// Tokens eaten by a match attempt, and how it ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Outcome {
    pub eaten: usize,
    pub state: ResultState,
}

impl Outcome {
    pub fn new(eaten: usize, state: ResultState) -> Self {
        Outcome { eaten, state }
    }

    pub fn broken() -> Self {
        Outcome::new(0, ResultState::Broken)
    }

    pub fn hungry(eaten: usize) -> Self {
        Outcome::new(eaten, ResultState::Hungry)
    }
}

impl From<Outcome> for (usize, ResultState) {
    fn from(outcome: Outcome) -> Self {
        (outcome.eaten, outcome.state)
    }
}
