//! Units: the smallest pieces of a phrase.

use simark_diagnostic::{Diagnostic, ErrorCode};
use simark_eval::{errors, Context};
use simark_ir::{Entity, ErrorNode, FaultKind, InvariantViolation, Span};
use simark_stack::ensure_sufficient_stack;

use crate::reader::{is_ident_char, is_reserved};
use crate::recovery;
use crate::Parser;

impl Parser<'_> {
    /// Parse one unit and push whatever it produces.
    ///
    /// Binding blocks usually produce nothing; everything else produces one
    /// entity and marks the line as having content, unless it is literal
    /// whitespace. Always consumes at least one character when not at a
    /// phrase end.
    pub(crate) fn parse_unit(
        &mut self,
        cx: &mut Context,
        units: &mut Vec<Entity>,
    ) -> Result<(), InvariantViolation> {
        let Some(c) = self.reader.peek() else {
            return Ok(());
        };
        let starts_name = self.reader.peek_second().is_some_and(is_ident_char);
        let content = self.line_content;
        let mut literal = false;
        let unit = match c {
            '\\' if starts_name => self.parse_call(cx)?,
            '~' if starts_name => self.parse_reference(cx)?,
            '[' => match self.parse_bracket_unit(cx, units)? {
                Some(unit) => unit,
                None => {
                    self.line_content = content;
                    return Ok(());
                }
            },
            '{' => self.parse_nest(cx)?,
            '`' => self.parse_verbatim(),
            '~' | ']' | '}' => self.stray(),
            _ => {
                literal = true;
                self.parse_text()
            }
        };
        let blank = literal && matches!(&unit, Entity::Text(text) if text.trim().is_empty());
        self.line_content = content || !blank;
        units.push(unit);
        Ok(())
    }

    /// Literal text up to the next markup, with escapes resolved.
    fn parse_text(&mut self) -> Entity {
        let mut text = String::new();
        while let Some(c) = self.reader.peek() {
            if c == '\\' {
                match self.reader.peek_second() {
                    Some(next) if is_ident_char(next) => break,
                    Some(next) => {
                        let start = self.reader.position();
                        self.reader.advance();
                        self.reader.advance();
                        if !is_reserved(next) && next != '\n' {
                            self.warn(
                                Diagnostic::warning(ErrorCode::S0002)
                                    .with_message(format!("`{next}` does not need escaping"))
                                    .with_label(self.span_from(start), "the `\\` can be removed"),
                            );
                        }
                        text.push(next);
                    }
                    None => {
                        let start = self.reader.position();
                        self.reader.advance();
                        self.warn(
                            Diagnostic::warning(ErrorCode::S0003)
                                .with_message("trailing `\\` at end of input")
                                .with_label(self.span_from(start), "kept as a literal backslash"),
                        );
                        text.push('\\');
                    }
                }
                continue;
            }
            if is_reserved(c) || (self.context.newline_ends_phrase() && self.reader.at_newline()) {
                break;
            }
            self.reader.advance();
            text.push(c);
        }
        Entity::Text(text)
    }

    /// A `{...}` group. An unclosed group is closed at end of input.
    fn parse_nest(&mut self, cx: &mut Context) -> Result<Entity, InvariantViolation> {
        let open = self.reader.position();
        self.reader.advance();
        let context = self.context.enter_nest();
        let blocks = ensure_sufficient_stack(|| self.with_context(context, |p| p.parse_blocks(cx)))?;
        if !self.reader.eat('}') {
            self.warn(
                Diagnostic::warning(ErrorCode::S0001)
                    .with_message("`{` is never closed")
                    .with_label(Span::from_offsets(open, open + 1), "group opened here")
                    .with_secondary_label(self.span_from(self.reader.position()), "input ends here")
                    .with_note("the group was closed at end of input"),
            );
        }
        Ok(Entity::Nest(blocks))
    }

    /// A verbatim span: a run of two or more backticks, closed by the same run.
    fn parse_verbatim(&mut self) -> Entity {
        let start = self.reader.position();
        let run = self.reader.run_length('`');
        if run < 2 {
            return self.stray();
        }
        let body_start = start + run;
        let fence = "`".repeat(run);
        match self.reader.source()[body_start..].find(&fence) {
            Some(offset) => {
                let body_end = body_start + offset;
                let body = self.reader.slice(body_start, body_end).to_owned();
                self.reader.set_position(body_end + run);
                Entity::Verbatim(body)
            }
            None => {
                self.reader.set_position(body_start);
                errors::malformed_syntax(
                    format!("verbatim opened with {run} backticks is never closed"),
                    self.span_from(start),
                )
            }
        }
    }

    /// `[`: a binding block, or a bracket group that means nothing.
    ///
    /// A binding block pushes its faults onto `units` and returns `None`;
    /// anything else is returned as one unit.
    fn parse_bracket_unit(
        &mut self,
        cx: &mut Context,
        units: &mut Vec<Entity>,
    ) -> Result<Option<Entity>, InvariantViolation> {
        if let Some(faults) = self.attempt(|p| p.parse_binding_block(cx))? {
            units.extend(faults);
            return Ok(None);
        }

        let start = self.reader.position();
        let mut probe = self.reader.clone();
        if !recovery::skip_bracket_group(&mut probe) {
            return Ok(Some(self.stray()));
        }
        self.reader = probe;
        let raw = self.reader.slice(start, self.reader.position());
        Ok(Some(
            ErrorNode::new(
                FaultKind::MalformedSyntax,
                "`[` does not start a binding; write `\\[` for a literal bracket",
                self.span_from(start),
            )
            .with_children(vec![Entity::text(raw)])
            .into(),
        ))
    }

    /// A reserved character with no meaning here. Consumes it.
    fn stray(&mut self) -> Entity {
        let start = self.reader.position();
        let c = self.reader.advance().unwrap_or('\0');
        errors::stray_character(c, self.span_from(start))
    }
}
