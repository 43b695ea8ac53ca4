//! Fatal engine defects.

use thiserror::Error;

/// An internal invariant was broken.
///
/// Author input can never produce one of these. When one surfaces the run
/// is aborted, because the parser or evaluator itself is wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("phrase loop made no progress at byte {position}")]
    PhraseLoopStalled { position: usize },

    #[error("unit loop made no progress at byte {position}")]
    UnitLoopStalled { position: usize },

    #[error("line loop made no progress at byte {position}")]
    LineLoopStalled { position: usize },

    #[error("attempted to pop the root local frame")]
    RootFramePopped,

    #[error("exit from isolated evaluation without a matching enter")]
    IsolationUnderflow,

    #[error("local frame stack has {found} frames after a scoped region, expected {expected}")]
    UnbalancedFrames { expected: usize, found: usize },
}
