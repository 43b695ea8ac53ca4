//! Diagnostic system for document faults and warnings.
//!
//! Faults inside a document stay in the tree as error entities. This crate
//! turns them, together with the parser's warnings, into [`Diagnostic`]s that
//! carry:
//! - an error code for searchability
//! - a message saying what went wrong
//! - a primary span saying where
//! - notes for extra context
//!
//! The [`emitter`] module renders diagnostics for a terminal.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
pub use simark_ir::Severity;
