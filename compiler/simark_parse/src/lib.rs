//! Structural parser for simark documents.
//!
//! Parsing and phase-1 evaluation are one pass. The parser reads characters,
//! tries grammar alternatives with checkpoint and restore, and hands every
//! committed invocation to the evaluator straight away, so the tree it
//! returns already has definitions applied and immediate calls inlined.
//! Only `~references` remain for phase 2.
//!
//! The parser is also the evaluator's [`PhraseSource`]: a macro whose
//! default reads ahead consumes the phrase that follows its invocation.
//!
//! Malformed input never aborts a parse. It becomes an error entity at the
//! fault site, or a warning for input that is accepted as written. Only a
//! broken engine invariant ends the parse early.

mod collapse;
mod context;
mod grammar;
mod outcome;
mod reader;
mod recovery;
mod snapshot;

use simark_diagnostic::Diagnostic;
use simark_eval::{Context, EvalResult, PhraseSource};
use simark_ir::{InvariantViolation, Span};

pub use collapse::collapse;
pub use context::ParseContext;
pub use outcome::{NoMatch, ParseFailure, ParseResult};
pub use reader::{is_ident_char, is_reserved, RESERVED};
pub use simark_ir::Entity;
pub use snapshot::Checkpoint;

use crate::grammar::finish_value;
use crate::reader::Reader;

/// Options for a single parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Replace single-child containers with their child.
    pub collapse: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions { collapse: true }
    }
}

/// A parsed (and phase-1 evaluated) document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOutput {
    pub document: Entity,
    /// Warnings for input accepted as written. Faults live in the tree.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_warnings(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Parse `source` against `cx` with default options.
pub fn parse(source: &str, cx: &mut Context) -> Result<ParseOutput, InvariantViolation> {
    parse_with_options(source, cx, ParseOptions::default())
}

#[tracing::instrument(level = "debug", skip_all, fields(len = source.len(), collapse = options.collapse))]
pub fn parse_with_options(
    source: &str,
    cx: &mut Context,
    options: ParseOptions,
) -> Result<ParseOutput, InvariantViolation> {
    let mut parser = Parser::new(source);
    let document = parser.parse_document(cx)?;
    let document = if options.collapse {
        collapse(document)
    } else {
        document
    };
    Ok(ParseOutput {
        document,
        diagnostics: parser.take_diagnostics(),
    })
}

/// Parser state for one document.
pub struct Parser<'src> {
    reader: Reader<'src>,
    context: ParseContext,
    diagnostics: Vec<Diagnostic>,
    /// Where the previous phrase of the current line ended.
    last_phrase_end: Option<usize>,
    /// Whether the current line has parsed a unit other than a binding block.
    line_content: bool,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Parser {
            reader: Reader::new(source),
            context: ParseContext::NONE,
            diagnostics: Vec::new(),
            last_phrase_end: None,
            line_content: false,
        }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    pub fn is_at_end(&self) -> bool {
        self.reader.at_end()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub(crate) fn warn(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(code = %diagnostic.code, "warning");
        self.diagnostics.push(diagnostic);
    }

    /// Span from `start` to the current position.
    pub(crate) fn span_from(&self, start: usize) -> Span {
        Span::from_offsets(start, self.reader.position())
    }

    /// Run `f` with `context` in force, restoring the previous flags after.
    pub(crate) fn with_context<T>(
        &mut self,
        context: ParseContext,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = std::mem::replace(&mut self.context, context);
        let result = f(self);
        self.context = saved;
        result
    }
}

impl PhraseSource for Parser<'_> {
    /// The phrase after the current position, trimmed, evaluated in `cx`.
    ///
    /// Stops before the `|` or line end that closes the phrase.
    fn read_phrase(&mut self, cx: &mut Context) -> EvalResult {
        self.reader.skip_inline_space();
        let start = self.reader.position();
        let units = self.parse_units(cx)?;
        tracing::trace!(from = start, to = self.reader.position(), "read ahead");
        Ok(finish_value(units))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
