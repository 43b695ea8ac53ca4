//! Checkpoints for speculative parsing.
//!
//! A checkpoint records everything a failed alternative may have touched:
//! the reader position, the warnings emitted so far, the context flags, and
//! the per-line state. Restoring one puts the parser back exactly.
//!
//! The evaluation context is not captured. Alternatives commit before their
//! first invocation or binding, so there is nothing there to roll back.

use tracing::trace;

use crate::context::ParseContext;
use crate::outcome::{ParseFailure, ParseResult};
use crate::Parser;
use simark_ir::InvariantViolation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    pub(crate) pos: usize,
    pub(crate) diagnostics_len: usize,
    pub(crate) context: ParseContext,
    pub(crate) last_phrase_end: Option<usize>,
    pub(crate) line_content: bool,
}

impl Parser<'_> {
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.reader.position(),
            diagnostics_len: self.diagnostics.len(),
            context: self.context,
            last_phrase_end: self.last_phrase_end,
            line_content: self.line_content,
        }
    }

    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        trace!(from = self.reader.position(), to = checkpoint.pos, "restore");
        self.reader.set_position(checkpoint.pos);
        self.diagnostics.truncate(checkpoint.diagnostics_len);
        self.context = checkpoint.context;
        self.last_phrase_end = checkpoint.last_phrase_end;
        self.line_content = checkpoint.line_content;
    }

    /// Run `rule`, restoring the checkpoint if it does not match.
    ///
    /// `Ok(None)` means the input is untouched and another alternative may
    /// be tried.
    pub(crate) fn attempt<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> Result<Option<T>, InvariantViolation> {
        let checkpoint = self.checkpoint();
        match rule(self) {
            Ok(value) => Ok(Some(value)),
            Err(ParseFailure::NoMatch) => {
                self.restore(checkpoint);
                Ok(None)
            }
            Err(ParseFailure::Fatal(violation)) => Err(violation),
        }
    }

    /// Whether `probe` succeeds here. Never consumes input.
    pub(crate) fn look_ahead(&mut self, probe: impl FnOnce(&mut Self) -> bool) -> bool {
        let checkpoint = self.checkpoint();
        let matched = probe(self);
        self.restore(checkpoint);
        matched
    }
}
