//! Binding blocks.
//!
//! ```text
//! [name = value | other[param = default] = value]     local
//! [[name = value]]                                     global
//! ```
//!
//! The block commits once `[` (or `[[`) is followed by a name and then `=`
//! or `[`. Each entry takes effect as soon as it is parsed, so later
//! entries and later units see it.
//!
//! Defaults are parsed isolated: global writes land in a throwaway overlay,
//! and earlier parameters of the same entry are visible as placeholders.
//! The value of an entry with defaults is parsed with every parameter
//! bound to a placeholder, so `\param` inside it stays deferred. Local
//! bindings made inside the value still land in the enclosing scope.

use tracing::debug;

use simark_eval::{errors, Binding, BindingScope, Context};
use simark_ir::{Entity, FaultKind, InvariantViolation, Name, NamedEntities};

use crate::context::ParseContext;
use crate::grammar::combine_faults;
use crate::outcome::{NoMatch, ParseResult};
use crate::recovery;
use crate::Parser;

impl Parser<'_> {
    /// Parse a binding block and apply its entries.
    ///
    /// Returns the faults of entries that could not be applied, in order.
    #[tracing::instrument(level = "debug", skip_all, fields(at = self.reader.position()))]
    pub(crate) fn parse_binding_block(&mut self, cx: &mut Context) -> ParseResult<Vec<Entity>> {
        let start = self.reader.position();
        let scope = if self.reader.try_literal("[[").is_ok() {
            BindingScope::Global
        } else {
            self.reader.try_literal("[")?;
            BindingScope::Local
        };
        if !self.look_ahead(Self::at_binding_entry) {
            return Err(NoMatch.into());
        }

        let close = match scope {
            BindingScope::Global => "]]",
            BindingScope::Local => "]",
        };
        let mut faults = Vec::new();
        let mut bound: Vec<Name> = Vec::new();
        loop {
            self.reader.skip_space();
            let entry_start = self.reader.position();
            match self.reader.ident().map(Name::new) {
                Some(name) => {
                    if let Some(fault) =
                        self.parse_binding_entry(cx, scope, name, entry_start, &mut bound)?
                    {
                        faults.push(fault);
                    }
                }
                None => {
                    recovery::skip_to_entry_end(&mut self.reader);
                    faults.push(errors::malformed_binding(
                        "expected a binding name",
                        self.span_from(entry_start),
                    ));
                }
            }

            self.reader.skip_space();
            if self.reader.eat('|') {
                continue;
            }
            if self.reader.try_literal(close).is_ok() {
                break;
            }
            if self.reader.eat(']') {
                faults.push(errors::malformed_binding(
                    "a global binding block closes with `]]`",
                    self.span_from(start),
                ));
            } else {
                faults.push(errors::malformed_binding(
                    format!("binding block is never closed; expected `{close}`"),
                    self.span_from(start),
                ));
            }
            break;
        }
        Ok(faults)
    }

    /// `name` then `=` or `[`, after optional whitespace.
    fn at_binding_entry(&mut self) -> bool {
        self.reader.skip_space();
        if self.reader.ident().is_none() {
            return false;
        }
        self.reader.skip_space();
        matches!(self.reader.peek(), Some('=' | '['))
    }

    /// Everything after the name of one entry. Binds it, or returns why not.
    fn parse_binding_entry(
        &mut self,
        cx: &mut Context,
        scope: BindingScope,
        name: Name,
        entry_start: usize,
        bound: &mut Vec<Name>,
    ) -> Result<Option<Entity>, InvariantViolation> {
        let mut faults = Vec::new();
        self.reader.skip_space();

        let defaults = if self.reader.peek() == Some('[') {
            if self.context.in_defaults() {
                recovery::skip_bracket_group(&mut self.reader);
                faults.push(errors::nested_defaults(&name, self.span_from(entry_start)));
                NamedEntities::new()
            } else {
                self.parse_defaults(cx, &name, &mut faults)?
            }
        } else {
            NamedEntities::new()
        };

        self.reader.skip_space();
        if !self.reader.eat('=') {
            recovery::skip_to_entry_end(&mut self.reader);
            faults.push(errors::malformed_binding(
                format!("expected `=` after `{name}`"),
                self.span_from(entry_start),
            ));
            return Ok(Some(self.entry_fault(&name, faults, entry_start)));
        }

        let value = if defaults.is_empty() {
            self.parse_value(cx)?
        } else {
            let params: Vec<Name> = defaults.names().cloned().collect();
            cx.with_placeholders(params, |cx| self.parse_value(cx))?
        };

        if bound.contains(&name) {
            faults.push(errors::duplicate_binding(&name, self.span_from(entry_start)));
        }
        if !faults.is_empty() {
            return Ok(Some(self.entry_fault(&name, faults, entry_start)));
        }

        debug!(name = %name, ?scope, params = defaults.len(), "bind");
        bound.push(name.clone());
        cx.bind(Binding::new(name, value, defaults, scope));
        Ok(None)
    }

    /// `[param = default | ...]` after a binding name.
    fn parse_defaults(
        &mut self,
        cx: &mut Context,
        owner: &Name,
        faults: &mut Vec<Entity>,
    ) -> Result<NamedEntities, InvariantViolation> {
        let open = self.reader.position();
        self.reader.advance();
        let mut defaults = NamedEntities::new();
        loop {
            self.reader.skip_space();
            let entry_start = self.reader.position();
            match self.reader.ident().map(Name::new) {
                Some(param) => {
                    self.parse_default_entry(cx, param, entry_start, &mut defaults, faults)?;
                }
                None if self.reader.peek() == Some(']') => {}
                None => {
                    recovery::skip_to_entry_end(&mut self.reader);
                    faults.push(errors::malformed_binding(
                        format!("expected a parameter name in the defaults of `{owner}`"),
                        self.span_from(entry_start),
                    ));
                }
            }

            self.reader.skip_space();
            if self.reader.eat('|') {
                continue;
            }
            if !self.reader.eat(']') {
                faults.push(errors::malformed_binding(
                    format!("defaults of `{owner}` are never closed"),
                    self.span_from(open),
                ));
            }
            break;
        }
        Ok(defaults)
    }

    fn parse_default_entry(
        &mut self,
        cx: &mut Context,
        param: Name,
        entry_start: usize,
        defaults: &mut NamedEntities,
        faults: &mut Vec<Entity>,
    ) -> Result<(), InvariantViolation> {
        self.reader.skip_space();
        if self.reader.peek() == Some('[') {
            recovery::skip_bracket_group(&mut self.reader);
            recovery::skip_to_entry_end(&mut self.reader);
            faults.push(errors::nested_defaults(&param, self.span_from(entry_start)));
            return Ok(());
        }
        if !self.reader.eat('=') {
            recovery::skip_to_entry_end(&mut self.reader);
            faults.push(errors::malformed_binding(
                format!("expected `=` after parameter `{param}`"),
                self.span_from(entry_start),
            ));
            return Ok(());
        }

        let earlier: Vec<Name> = defaults.names().cloned().collect();
        let context = self.context.with(ParseContext::IN_DEFAULTS);
        let value = cx.with_isolation(|cx| {
            for name in earlier {
                cx.set_local(Binding::placeholder(name));
            }
            self.with_context(context, |p| p.parse_value(cx))
        })?;

        // A malformed binding inside the default makes the owner malformed too.
        if value
            .faults()
            .iter()
            .any(|fault| fault.kind == FaultKind::MalformedBinding)
        {
            faults.push(value);
            return Ok(());
        }
        if let Err(duplicate) = defaults.try_insert(param, value) {
            faults.push(errors::duplicate_parameter(
                &duplicate.name,
                self.span_from(entry_start),
            ));
        }
        Ok(())
    }

    fn entry_fault(&self, name: &Name, faults: Vec<Entity>, entry_start: usize) -> Entity {
        combine_faults(
            faults,
            Vec::new(),
            FaultKind::MalformedBinding,
            format!("binding `{name}` was not applied"),
            self.span_from(entry_start),
        )
    }
}
