use super::*;
use pretty_assertions::assert_eq;
use simark_ir::{FaultKind, NamedEntities, Span};

fn text(s: &str) -> Entity {
    Entity::text(s)
}

#[test]
fn test_render_by_container_role() {
    let tree = Entity::Nest(vec![
        Entity::Block(vec![
            Entity::Line(vec![text("a"), text("b"), Entity::empty()]),
            Entity::Phrase(vec![text("x"), Entity::Number(2)]),
        ]),
        text("second block"),
    ]);

    assert_eq!(render_text(&tree), "a | b | \nx2\n\nsecond block");
}

#[test]
fn test_render_keeps_faults_visible() {
    let tree = Entity::Phrase(vec![
        text("see "),
        Entity::error(FaultKind::UnboundName, "`x` is not bound", Span::new(4, 6)),
    ]);
    assert_eq!(
        render_text(&tree),
        "see [!unbound-name: `x` is not bound]"
    );
}

#[test]
fn test_render_verbatim_untouched() {
    assert_eq!(render_text(&Entity::Verbatim("\\x | {y}".into())), "\\x | {y}");
}

#[test]
fn test_node_tree() {
    let tree = Entity::Line(vec![text("a"), Entity::reference("later", NamedEntities::new())]);
    let node = to_node(&tree);

    assert_eq!(node.kind, "line");
    assert_eq!(node.children.len(), 2);
    assert_eq!(node.children[0].attributes.get("value").map(String::as_str), Some("a"));
    assert_eq!(node.children[1].kind, "ref");
    assert_eq!(
        node.children[1].attributes.get("name").map(String::as_str),
        Some("later")
    );
}

#[test]
fn test_node_serialization_skips_empty_fields() {
    let node = to_node(&Entity::Phrase(vec![text("hi")]));
    let json = serde_json::to_string(&node).unwrap();
    assert_eq!(
        json,
        r#"{"kind":"phrase","children":[{"kind":"text","attributes":{"value":"hi"}}]}"#
    );
}

#[test]
fn test_error_node_attributes() {
    let node = to_node(&Entity::error(
        FaultKind::ArgumentMerge,
        "`h` has no parameter named `x`",
        Span::new(2, 9),
    ));
    let keys: Vec<&str> = node.attributes.keys().copied().collect();
    assert_eq!(keys, vec!["end", "fault", "message", "severity", "start"]);
    assert_eq!(node.attributes["fault"], "argument-merge");
    assert_eq!(node.attributes["severity"], "error");
}
