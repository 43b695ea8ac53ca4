//! Result types for speculative parsing.
//!
//! A grammar rule that has not yet committed fails with
//! [`ParseFailure::NoMatch`]: nothing was evaluated, so the caller restores
//! its checkpoint and tries the next alternative. After the commit point a
//! rule never fails softly; malformed input becomes an error entity in the
//! tree, and only broken engine invariants propagate as
//! [`ParseFailure::Fatal`].

use simark_ir::InvariantViolation;

/// The input here does not start the production being tried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoMatch;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseFailure {
    /// Not this production; try another.
    NoMatch,
    /// The engine itself is broken. Parsing stops.
    Fatal(InvariantViolation),
}

impl From<NoMatch> for ParseFailure {
    fn from(_: NoMatch) -> Self {
        ParseFailure::NoMatch
    }
}

impl From<InvariantViolation> for ParseFailure {
    fn from(violation: InvariantViolation) -> Self {
        ParseFailure::Fatal(violation)
    }
}

pub type ParseResult<T> = Result<T, ParseFailure>;
