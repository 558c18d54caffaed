//! Tag-pattern matching over classified lines
//!
//!     Source text is turned into blocks in three steps:
//!
//!         1. [`classify`] tags every line (`field`, `slug`, `indent`, `blank`, ...) using
//!            ordered leaf string patterns.
//!         2. [`registry`] compiles the structural block patterns once at startup, written in
//!            the small DSL described in [`pattern`], and checks each against its expected
//!            regular expression.
//!         3. [`grouping`] feeds the tagged tokens through [`matching`] and cuts the stream
//!            into named blocks.
//!
//!     Configuration comes from [`config`]; errors from the compile and registry steps are
//!     defined in [`error`].

pub mod classify;
pub mod config;
pub mod error;
pub mod grouping;
pub mod leaf;
pub mod matching;
pub mod pattern;
pub mod registry;
pub mod testing;
pub mod token;
