//! Grammar rules, one file per level of structure.
//!
//! - `document`: blocks separated by blank lines
//! - `phrase`: lines, `|`-separated phrases, and the unit loop
//! - `unit`: text, escapes, verbatim, `{...}` groups, stray characters
//! - `binding`: `[...]` and `[[...]]` binding blocks with defaults
//! - `invocation`: `\name[args]` and `~name[args]`
//!
//! Every rule takes the evaluation [`Context`] explicitly. Parsing is
//! evaluation: invocations run as soon as they are read, and bindings take
//! effect before the next unit is parsed.

mod binding;
mod document;
mod invocation;
mod phrase;
mod unit;

use simark_eval::Context;
use simark_ir::{Entity, ErrorNode, FaultKind, InvariantViolation, Span};

use crate::Parser;

impl Parser<'_> {
    /// One bracketed value, up to the next `|` or `]`.
    ///
    /// Outer whitespace is trimmed and a single unit stands for itself.
    pub(crate) fn parse_value(&mut self, cx: &mut Context) -> Result<Entity, InvariantViolation> {
        let context = self.context.enter_brackets();
        self.with_context(context, |p| {
            p.reader.skip_space();
            let units = p.parse_units(cx)?;
            Ok(finish_value(units))
        })
    }
}

/// Trim outer whitespace from `units` and collapse them to one entity.
///
/// An empty value is the empty text.
pub(crate) fn finish_value(mut units: Vec<Entity>) -> Entity {
    if let Some(Entity::Text(first)) = units.first_mut() {
        let trimmed = first.trim_start();
        if trimmed.len() != first.len() {
            *first = trimmed.to_owned();
        }
        if first.is_empty() {
            units.remove(0);
        }
    }
    if let Some(Entity::Text(last)) = units.last_mut() {
        let trimmed_len = last.trim_end().len();
        last.truncate(trimmed_len);
        if last.is_empty() {
            units.pop();
        }
    }
    if units.len() > 1 {
        return Entity::Phrase(units);
    }
    units.pop().unwrap_or_else(|| Entity::text(""))
}

/// Fold the faults of one construct into a single entity.
///
/// `partial` holds whatever values were parsed before things went wrong.
pub(crate) fn combine_faults(
    mut faults: Vec<Entity>,
    partial: Vec<Entity>,
    kind: FaultKind,
    message: impl Into<String>,
    span: Span,
) -> Entity {
    if faults.len() == 1 {
        if let Some(Entity::Error(mut node)) = faults.pop() {
            node.children.extend(partial);
            return Entity::Error(node);
        }
    }
    faults.extend(partial);
    ErrorNode::new(kind, message, span)
        .with_children(faults)
        .into()
}
