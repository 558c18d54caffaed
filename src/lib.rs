//! # tagblock
//!
//! Groups classified lines of text into structural blocks by matching their tags against
//! compiled tag patterns.
//!
//! ## Testing
//!
//! Shared factories for token sequences and compiled patterns live in the
//! [testing module](tagblock::testing).

pub mod tagblock;
