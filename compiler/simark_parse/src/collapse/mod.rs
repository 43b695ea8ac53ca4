//! Single-child collapse.
//!
//! A nest, line or phrase holding exactly one child is replaced by that
//! child, bottom-up. Blocks are never replaced, so block boundaries survive.
//! Collapsing twice changes nothing.

use simark_ir::{Entity, Invocation};
use simark_stack::ensure_sufficient_stack;

/// Collapse every single-child container in `entity`.
pub fn collapse(entity: Entity) -> Entity {
    match entity {
        Entity::Nest(items) => collapse_container(items, Entity::Nest),
        Entity::Block(items) => Entity::Block(collapse_all(items)),
        Entity::Line(items) => collapse_container(items, Entity::Line),
        Entity::Phrase(items) => collapse_container(items, Entity::Phrase),
        Entity::Call(inv) => Entity::Call(collapse_args(inv)),
        Entity::Ref(inv) => Entity::Ref(collapse_args(inv)),
        Entity::Error(mut node) => {
            node.children = collapse_all(std::mem::take(&mut node.children));
            Entity::Error(node)
        }
        leaf => leaf,
    }
}

fn collapse_container(items: Vec<Entity>, rebuild: fn(Vec<Entity>) -> Entity) -> Entity {
    let mut items = collapse_all(items);
    if items.len() == 1 {
        if let Some(only) = items.pop() {
            return only;
        }
    }
    rebuild(items)
}

fn collapse_all(items: Vec<Entity>) -> Vec<Entity> {
    ensure_sufficient_stack(|| items.into_iter().map(collapse).collect())
}

fn collapse_args(mut inv: Invocation) -> Invocation {
    inv.args = std::mem::take(&mut inv.args)
        .into_iter()
        .map(|(name, value)| (name, collapse(value)))
        .collect();
    inv
}
