//! Result types for the document pipeline.
//!
//! These are the interface between the driver and its consumers (CLI,
//! renderers, tests). They carry everything needed to present a result
//! without reaching back into the engine.

use std::fmt;

use simark_diagnostic::{Diagnostic, ErrorCode};
use simark_eval::output::Node;
use simark_ir::{Entity, InvariantViolation};
use thiserror::Error;

/// Which phase hit an engine defect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorPhase {
    /// Parsing with phase-1 evaluation.
    Parse,
    /// Phase-2 evaluation of the finished tree.
    Render,
}

impl fmt::Display for ErrorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorPhase::Parse => "parse",
            ErrorPhase::Render => "render",
        })
    }
}

/// A run that could not finish because the engine itself is broken.
///
/// Problems in the document never end up here; they are faults in the tree.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("internal error during {phase}: {violation}")]
pub struct EngineError {
    pub phase: ErrorPhase,
    #[source]
    pub violation: InvariantViolation,
}

impl EngineError {
    pub fn new(phase: ErrorPhase, violation: InvariantViolation) -> Self {
        EngineError { phase, violation }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(ErrorCode::S9001)
            .with_message(self.to_string())
            .with_note("this is a defect in the engine, not in the document")
    }
}

/// Result of processing one document.
#[derive(Clone, Debug)]
pub struct DocumentOutput {
    /// The phase-1 tree: definitions applied, immediate calls inlined.
    pub tree: Entity,
    /// The phase-2 tree: every remaining reference resolved.
    pub evaluated: Entity,
    /// Plain text, when requested.
    pub text: Option<String>,
    /// Renderer node tree, when requested.
    pub nodes: Option<Node>,
    /// Parser warnings and one error per fault in `evaluated`, in source order.
    pub diagnostics: Vec<Diagnostic>,
    /// Phase 2 stopped early; `evaluated` holds only the blocks finished.
    pub cancelled: bool,
}

impl DocumentOutput {
    pub fn fault_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }

    /// Whether the document rendered completely and without faults.
    pub fn is_clean(&self) -> bool {
        !self.cancelled && self.fault_count() == 0
    }
}
