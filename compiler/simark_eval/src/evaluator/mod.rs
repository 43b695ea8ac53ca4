//! Call dispatch shared by parse-time invocation and the phase-2 walk.
//!
//! [`Evaluator::call`] is the one operation every entity supports. Plain
//! values return themselves; `Call` and `Ref` look their target up, build a
//! frame from the target's defaults overridden by the given arguments, and
//! evaluate the target's value inside that frame.
//!
//! Evaluating a value is a tree walk ([`Evaluator::evaluate`]) that rebuilds
//! containers and invokes every `Call`/`Ref` it meets, so references captured
//! when a macro was defined resolve against the frame of each invocation.

use simark_ir::{Entity, Intrinsic, InvariantViolation, Invocation, NamedEntities, Span};
use simark_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::environment::Frame;
use crate::errors;
use crate::{Binding, Context, EvalMode};

/// Result of evaluating one entity. Only engine defects are `Err`.
pub type EvalResult = Result<Entity, InvariantViolation>;

/// Longest `Ref -> Ref -> ...` chain followed when checking for read-ahead.
const MAX_REF_CHAIN: usize = 16;

/// The narrow way back into the grammar: consume the next phrase of source.
///
/// Implemented by the parser during phase 1. The returned phrase has already
/// been evaluated in `cx`, like everything else the parser produces.
pub trait PhraseSource {
    fn read_phrase(&mut self, cx: &mut Context) -> EvalResult;
}

/// Dispatches `call` over entities against one [`Context`].
pub struct Evaluator<'a> {
    cx: &'a mut Context,
    source: Option<&'a mut dyn PhraseSource>,
    mode: EvalMode,
    /// Where the current invocation was written, for fault spans.
    site: Span,
}

impl<'a> Evaluator<'a> {
    pub fn new(cx: &'a mut Context, mode: EvalMode) -> Self {
        Evaluator {
            cx,
            source: None,
            mode,
            site: Span::DUMMY,
        }
    }

    /// Allow read-ahead intrinsics to consume from `source`.
    #[must_use]
    pub fn with_source(mut self, source: &'a mut dyn PhraseSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Attribute faults to `site`.
    #[must_use]
    pub fn at(mut self, site: Span) -> Self {
        self.site = site;
        self
    }

    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    /// The uniform dispatch: what this entity produces when invoked.
    pub fn call(&mut self, entity: &Entity) -> EvalResult {
        match entity {
            Entity::Call(inv) | Entity::Ref(inv) => self.invoke(inv),
            Entity::Placeholder(name) => Ok(Entity::Ref(Invocation::bare(name.clone()))),
            Entity::Intrinsic(intrinsic) => self.run_intrinsic(*intrinsic),
            Entity::Text(_)
            | Entity::Number(_)
            | Entity::Verbatim(_)
            | Entity::Nest(_)
            | Entity::Block(_)
            | Entity::Line(_)
            | Entity::Phrase(_)
            | Entity::Error(_) => Ok(entity.clone()),
        }
    }

    /// Rebuild `entity`, invoking every `Call` and `Ref` inside it.
    pub fn evaluate(&mut self, entity: &Entity) -> EvalResult {
        match entity {
            Entity::Nest(items) => Ok(Entity::Nest(self.evaluate_all(items)?)),
            Entity::Block(items) => Ok(Entity::Block(self.evaluate_all(items)?)),
            Entity::Line(items) => Ok(Entity::Line(self.evaluate_all(items)?)),
            Entity::Phrase(items) => Ok(Entity::Phrase(self.evaluate_all(items)?)),
            _ => self.call(entity),
        }
    }

    fn evaluate_all(&mut self, items: &[Entity]) -> Result<Vec<Entity>, InvariantViolation> {
        ensure_sufficient_stack(|| items.iter().map(|item| self.evaluate(item)).collect())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(name = %inv.name, mode = %self.mode))]
    fn invoke(&mut self, inv: &Invocation) -> EvalResult {
        let Some(binding) = self.cx.get(inv.name.as_str()).cloned() else {
            return Ok(errors::unbound_name(&inv.name, self.site));
        };

        if binding.is_placeholder() {
            return Ok(Entity::Ref(inv.clone()));
        }

        if let Some(arg) = inv
            .args
            .names()
            .find(|arg| !binding.defaults.contains(arg.as_str()))
        {
            let partial = inv.args.iter().map(|(_, value)| value.clone()).collect();
            return Ok(errors::undeclared_argument(&inv.name, arg, self.site, partial));
        }

        if !self.cx.enter_call() {
            return Ok(errors::recursion_limit(
                &inv.name,
                self.cx.call_limit(),
                self.site,
            ));
        }
        let result = ensure_sufficient_stack(|| self.enter_binding(&binding, &inv.args));
        self.cx.exit_call();
        result
    }

    /// Merge defaults with `args`, push the frame, evaluate, pop.
    ///
    /// Read-ahead defaults that `args` does not override are forced first,
    /// while the caller's scope is still on top.
    ///
    /// An intrinsic runs in the caller's scope, with no frame of its own.
    fn enter_binding(&mut self, binding: &Binding, args: &NamedEntities) -> EvalResult {
        if let Entity::Intrinsic(intrinsic) = binding.value.as_ref() {
            return self.run_intrinsic(*intrinsic);
        }
        let mut frame = Frame::default();
        for (param, default) in binding.defaults.iter() {
            let value = match args.get(param.as_str()) {
                Some(arg) => arg.clone(),
                None if self.is_read_ahead(default) => {
                    trace!(param = %param, "forcing read-ahead default");
                    self.evaluate(default)?
                }
                None => default.clone(),
            };
            frame.insert(param.clone(), Binding::local(param.clone(), value));
        }

        let depth = self.cx.push_frame(frame);
        let result = self.evaluate(&binding.value);
        self.cx.pop_frame_to(depth)?;
        result
    }

    /// Whether `entity` is a reference that ends at a source-reading intrinsic.
    fn is_read_ahead(&self, entity: &Entity) -> bool {
        let mut current = entity;
        for _ in 0..MAX_REF_CHAIN {
            match current {
                Entity::Intrinsic(Intrinsic::ReadPhrase) => return true,
                Entity::Ref(inv) => match self.cx.get(inv.name.as_str()) {
                    Some(binding) => current = binding.value.as_ref(),
                    None => return false,
                },
                _ => return false,
            }
        }
        false
    }

    fn run_intrinsic(&mut self, intrinsic: Intrinsic) -> EvalResult {
        match intrinsic {
            Intrinsic::ReadPhrase => {
                if !self.mode.allows_read_ahead() {
                    return Ok(errors::read_ahead_unavailable(self.site));
                }
                match self.source.as_deref_mut() {
                    Some(source) => source.read_phrase(self.cx),
                    None => Ok(errors::read_ahead_unavailable(self.site)),
                }
            }
        }
    }
}
