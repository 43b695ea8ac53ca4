//! Phase-2 output: plain text and a format-neutral node tree.
//!
//! Both walks read an evaluated tree. A container's children are rendered by
//! the role the container gives them: a nest holds blocks, a block holds
//! lines, a line holds phrases, and a phrase holds units. This still holds
//! after collapse has removed single-child levels.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Serialize;

use simark_ir::Entity;

/// Separator between the phrases of one line.
pub const PHRASE_SEPARATOR: &str = " | ";

/// Render an evaluated tree as plain text.
///
/// Faults stay visible as `[!kind: message]` so partial output is never
/// silently wrong.
pub fn render_text(entity: &Entity) -> String {
    let mut out = String::new();
    write_text(entity, &mut out);
    out
}

fn write_text(entity: &Entity, out: &mut String) {
    match entity {
        Entity::Text(text) | Entity::Verbatim(text) => out.push_str(text),
        Entity::Number(n) => {
            let _ = write!(out, "{n}");
        }
        Entity::Nest(items) => write_joined(items, "\n\n", out),
        Entity::Block(items) => write_joined(items, "\n", out),
        Entity::Line(items) => write_joined(items, PHRASE_SEPARATOR, out),
        Entity::Phrase(items) => write_joined(items, "", out),
        Entity::Call(inv) => {
            let _ = write!(out, "\\{}", inv.name);
        }
        Entity::Ref(inv) => {
            let _ = write!(out, "~{}", inv.name);
        }
        Entity::Placeholder(name) => {
            let _ = write!(out, "~{name}");
        }
        Entity::Intrinsic(_) => {}
        Entity::Error(node) => {
            let _ = write!(out, "[!{}: {}]", node.kind, node.message);
        }
    }
}

fn write_joined(items: &[Entity], separator: &str, out: &mut String) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        write_text(item, out);
    }
}

/// One record of the structured intermediate tree handed to renderers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<&'static str, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    fn new(kind: &'static str) -> Self {
        Node {
            kind,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value.into());
        self
    }

    #[must_use]
    fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }
}

/// Convert an evaluated tree into renderer nodes.
pub fn to_node(entity: &Entity) -> Node {
    let kind = entity.kind_name();
    match entity {
        Entity::Text(text) | Entity::Verbatim(text) => Node::new(kind).attr("value", text.clone()),
        Entity::Number(n) => Node::new(kind).attr("value", n.to_string()),
        Entity::Nest(items) | Entity::Block(items) | Entity::Line(items) | Entity::Phrase(items) => {
            Node::new(kind).with_children(items.iter().map(to_node).collect())
        }
        Entity::Call(inv) | Entity::Ref(inv) => {
            let args = inv
                .args
                .iter()
                .map(|(name, value)| {
                    Node::new("arg")
                        .attr("name", name.as_str())
                        .with_children(vec![to_node(value)])
                })
                .collect();
            Node::new(kind)
                .attr("name", inv.name.as_str())
                .with_children(args)
        }
        Entity::Placeholder(name) => Node::new(kind).attr("name", name.as_str()),
        Entity::Intrinsic(intrinsic) => Node::new(kind).attr("name", intrinsic.prelude_name()),
        Entity::Error(node) => Node::new(kind)
            .attr("fault", node.kind.label())
            .attr("message", node.message.clone())
            .attr("severity", node.severity.to_string())
            .attr("start", node.span.start.to_string())
            .attr("end", node.span.end.to_string())
            .with_children(node.children.iter().map(to_node).collect()),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
