//! Tag Pattern Matching
//!
//!     Matching walks a compiled [`PatternNode`] tree against a slice of tagged tokens and
//!     reports how many tokens it ate together with a [`ResultState`].
//!
//!     The input may be incomplete: tokens are often matched while a line-by-line producer is
//!     still running. The result states therefore distinguish "this can never match here"
//!     (`Broken`) from "cannot decide yet" (`Hungry`), and have several flavors of acceptance.
//!
//!     Evaluation is pure: no state is kept between calls and the tree is never mutated, so
//!     the same compiled tree can be matched from many threads at once. Recursion follows the
//!     tree's nesting only; `*` and `+` loop iteratively, so cost grows linearly with the
//!     number of tokens eaten rather than with stack depth.
//!
//! Entry Points
//!
//!     - [`consume`]: match at the very start of the slice.
//!     - [`find_match`]: scan start offsets for the first accepted span.
//!     - [`Matcher`]: the same two operations with explicit configuration (trace mode).
//!
//! [`PatternNode`]: crate::tagblock::pattern::PatternNode

pub mod consume;
pub mod scanner;
pub mod state;

pub use consume::{consume, Matcher};
pub use scanner::{find_match, Match};
pub use state::{Outcome, ResultState};
