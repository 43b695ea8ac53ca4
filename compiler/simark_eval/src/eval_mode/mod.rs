//! Evaluation modes.
//!
//! The same call dispatch runs in both phases of a document run. The mode
//! carries the policy differences through match dispatch instead of generics.

use std::fmt;

/// Which phase the evaluator is running in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Phase 1: invocations run while the parser reads the source.
    #[default]
    Bootstrap,
    /// Phase 2: a cursor-free walk over the finished tree.
    Render,
}

impl EvalMode {
    /// Whether intrinsics may consume source text.
    ///
    /// Only phase 1 has a source to read from; in phase 2 a read-ahead
    /// produces an error node.
    #[inline]
    pub fn allows_read_ahead(self) -> bool {
        matches!(self, Self::Bootstrap)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bootstrap => "bootstrap",
            Self::Render => "render",
        }
    }
}

impl fmt::Display for EvalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests;
