//! Parser tests, grouped by concern.

mod document;
mod properties;

use simark_eval::output::render_text;
use simark_eval::Context;
use simark_ir::{Entity, FaultKind};

use crate::{parse, parse_with_options, ParseOptions, ParseOutput};

/// Parse with the prelude and default options.
fn parse_doc(source: &str) -> (Entity, Context) {
    let mut cx = Context::with_prelude();
    let output = parse(source, &mut cx).unwrap();
    (output.document, cx)
}

/// Parse without collapsing, keeping every structural level.
fn parse_raw(source: &str) -> ParseOutput {
    let mut cx = Context::with_prelude();
    parse_with_options(source, &mut cx, ParseOptions { collapse: false }).unwrap()
}

/// The only line of a one-block, one-line document.
fn parse_body(source: &str) -> (Entity, Context) {
    let (doc, cx) = parse_doc(source);
    let Entity::Block(mut lines) = doc else {
        panic!("expected a single block, got {doc:?}");
    };
    assert_eq!(lines.len(), 1, "expected a single line, got {lines:?}");
    (lines.pop().unwrap(), cx)
}

fn render(source: &str) -> String {
    render_text(&parse_doc(source).0)
}

fn text(s: &str) -> Entity {
    Entity::text(s)
}

fn phrase(units: Vec<Entity>) -> Entity {
    Entity::Phrase(units)
}

fn fault_kind(entity: &Entity) -> Option<FaultKind> {
    match entity {
        Entity::Error(node) => Some(node.kind),
        _ => None,
    }
}

/// Kinds of every fault in the tree, in document order.
fn fault_kinds(entity: &Entity) -> Vec<FaultKind> {
    entity.faults().iter().map(|fault| fault.kind).collect()
}
