//! Invocations: `\name[args]` runs now, `~name[args]` is kept for later.
//!
//! Arguments are always parsed (and so evaluated) where they are written.
//! An argument list commits on `[` followed by `]` or by a name and `=`;
//! anything else after the name is left for the next unit, so
//! `\name[[g = 1]]` is an invocation followed by a global binding block.

use simark_eval::{errors, Context, EvalMode, Evaluator};
use simark_ir::{Entity, FaultKind, InvariantViolation, Invocation, Name, NamedEntities};
use tracing::trace;

use crate::grammar::combine_faults;
use crate::outcome::{NoMatch, ParseResult};
use crate::recovery;
use crate::Parser;

impl Parser<'_> {
    /// `\name[args]`, invoked immediately. The result replaces it.
    pub(crate) fn parse_call(&mut self, cx: &mut Context) -> Result<Entity, InvariantViolation> {
        let start = self.reader.position();
        let invocation = match self.parse_invocation(cx)? {
            Ok(invocation) => invocation,
            Err(fault) => return Ok(fault),
        };
        let site = self.span_from(start);
        trace!(name = %invocation.name, ?site, "invoke");
        Evaluator::new(cx, EvalMode::Bootstrap)
            .with_source(self)
            .at(site)
            .call(&Entity::Call(invocation))
    }

    /// `~name[args]`, captured unevaluated.
    pub(crate) fn parse_reference(
        &mut self,
        cx: &mut Context,
    ) -> Result<Entity, InvariantViolation> {
        Ok(match self.parse_invocation(cx)? {
            Ok(invocation) => Entity::Ref(invocation),
            Err(fault) => fault,
        })
    }

    /// Sigil, name, and optional argument list.
    fn parse_invocation(
        &mut self,
        cx: &mut Context,
    ) -> Result<Result<Invocation, Entity>, InvariantViolation> {
        self.reader.advance();
        let name = Name::new(self.reader.ident().unwrap_or_default());
        Ok(match self.attempt(|p| p.parse_arg_list(cx, &name))? {
            None => Ok(Invocation::new(name, NamedEntities::new())),
            Some(Ok(args)) => Ok(Invocation::new(name, args)),
            Some(Err(fault)) => Err(fault),
        })
    }

    /// `[key = value | ...]` directly after an invocation name.
    fn parse_arg_list(
        &mut self,
        cx: &mut Context,
        target: &Name,
    ) -> ParseResult<Result<NamedEntities, Entity>> {
        let open = self.reader.position();
        self.reader.try_literal("[")?;
        let commits = self.look_ahead(|p| {
            p.reader.skip_space();
            if p.reader.peek() == Some(']') {
                return true;
            }
            if p.reader.ident().is_none() {
                return false;
            }
            p.reader.skip_space();
            p.reader.peek() == Some('=')
        });
        if !commits {
            return Err(NoMatch.into());
        }

        let mut args = NamedEntities::new();
        let mut faults = Vec::new();
        loop {
            self.reader.skip_space();
            let entry_start = self.reader.position();
            match self.reader.ident().map(Name::new) {
                Some(key) => {
                    self.reader.skip_space();
                    if self.reader.eat('=') {
                        let value = self.parse_value(cx)?;
                        if let Err(duplicate) = args.try_insert(key, value) {
                            faults.push(errors::duplicate_argument(
                                target,
                                &duplicate.name,
                                self.span_from(entry_start),
                            ));
                        }
                    } else {
                        recovery::skip_to_entry_end(&mut self.reader);
                        faults.push(errors::malformed_syntax(
                            format!("expected `=` after argument `{key}`"),
                            self.span_from(entry_start),
                        ));
                    }
                }
                None if self.reader.peek() == Some(']') => {}
                None => {
                    recovery::skip_to_entry_end(&mut self.reader);
                    faults.push(errors::malformed_syntax(
                        format!("expected an argument name for `{target}`"),
                        self.span_from(entry_start),
                    ));
                }
            }

            self.reader.skip_space();
            if self.reader.eat('|') {
                continue;
            }
            if !self.reader.eat(']') {
                faults.push(errors::malformed_syntax(
                    format!("argument list for `{target}` is never closed"),
                    self.span_from(open),
                ));
            }
            break;
        }

        if faults.is_empty() {
            return Ok(Ok(args));
        }
        let partial = args.into_iter().map(|(_, value)| value).collect();
        Ok(Err(combine_faults(
            faults,
            partial,
            FaultKind::MalformedSyntax,
            format!("malformed argument list for `{target}`"),
            self.span_from(open),
        )))
    }
}
