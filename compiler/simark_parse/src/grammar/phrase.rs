//! Lines, phrases and the unit loop.
//!
//! A line is one or more phrases separated by `|`. Empty phrases are
//! kept, so `a||b` has three. Each loop here checks that it moved the
//! reader; a loop that stops moving is an engine defect, not an input error.

use simark_eval::Context;
use simark_ir::{Entity, InvariantViolation};

use crate::Parser;

impl Parser<'_> {
    /// Parse one line and its terminator.
    ///
    /// Returns `None` for a line that held nothing but binding blocks and
    /// whitespace, and whose bindings all applied cleanly.
    pub(crate) fn parse_line(
        &mut self,
        cx: &mut Context,
    ) -> Result<Option<Entity>, InvariantViolation> {
        let outer = self.last_phrase_end.take();
        let outer_content = std::mem::replace(&mut self.line_content, false);
        let mut phrases = Vec::new();
        loop {
            let units = self.parse_units(cx)?;
            let end = self.reader.position();
            if self.last_phrase_end == Some(end) {
                return Err(InvariantViolation::PhraseLoopStalled { position: end });
            }
            self.last_phrase_end = Some(end);
            phrases.push(Entity::Phrase(units));
            if !self.reader.eat('|') {
                break;
            }
        }
        self.reader.eat_newline();
        self.last_phrase_end = outer;
        let has_content = std::mem::replace(&mut self.line_content, outer_content);

        let definition_only = !has_content && is_blank_phrase(&phrases);
        Ok((!definition_only).then_some(Entity::Line(phrases)))
    }

    /// Units until the current phrase ends.
    pub(crate) fn parse_units(
        &mut self,
        cx: &mut Context,
    ) -> Result<Vec<Entity>, InvariantViolation> {
        let mut units = Vec::new();
        while !self.at_phrase_end() {
            let start = self.reader.position();
            self.parse_unit(cx, &mut units)?;
            if self.reader.position() == start {
                return Err(InvariantViolation::UnitLoopStalled { position: start });
            }
        }
        Ok(units)
    }

    pub(crate) fn at_phrase_end(&self) -> bool {
        match self.reader.peek() {
            None | Some('|') => true,
            Some(c) if self.context.closes(c) => true,
            Some(_) => self.context.newline_ends_phrase() && self.reader.at_newline(),
        }
    }
}

/// A single phrase holding at most whitespace.
fn is_blank_phrase(phrases: &[Entity]) -> bool {
    match phrases {
        [Entity::Phrase(units)] => units
            .iter()
            .all(|unit| matches!(unit, Entity::Text(text) if text.trim().is_empty())),
        _ => false,
    }
}
