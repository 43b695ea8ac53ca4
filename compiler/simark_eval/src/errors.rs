//! Centralized constructors for in-tree error nodes.
//!
//! Both the evaluator and the parser build their fault entities here, so
//! every author-visible message lives in one place.

use simark_ir::{Entity, ErrorNode, FaultKind, Name, Span};

// Lookup

#[cold]
pub fn unbound_name(name: &Name, span: Span) -> Entity {
    Entity::error(FaultKind::UnboundName, format!("`{name}` is not bound"), span)
}

// Argument merge

#[cold]
pub fn undeclared_argument(target: &Name, arg: &Name, span: Span, partial: Vec<Entity>) -> Entity {
    ErrorNode::new(
        FaultKind::ArgumentMerge,
        format!("`{target}` has no parameter named `{arg}`"),
        span,
    )
    .with_children(partial)
    .into()
}

#[cold]
pub fn duplicate_argument(target: &Name, arg: &Name, span: Span) -> Entity {
    Entity::error(
        FaultKind::ArgumentMerge,
        format!("argument `{arg}` given twice to `{target}`"),
        span,
    )
}

// Bindings

#[cold]
pub fn nested_defaults(name: &Name, span: Span) -> Entity {
    Entity::error(
        FaultKind::MalformedBinding,
        format!("default for `{name}` declares its own defaults; defaults cannot nest"),
        span,
    )
}

#[cold]
pub fn duplicate_binding(name: &Name, span: Span) -> Entity {
    Entity::error(
        FaultKind::MalformedBinding,
        format!("`{name}` is bound twice in one binding block"),
        span,
    )
}

#[cold]
pub fn duplicate_parameter(name: &Name, span: Span) -> Entity {
    Entity::error(
        FaultKind::MalformedBinding,
        format!("parameter `{name}` is declared twice"),
        span,
    )
}

#[cold]
pub fn malformed_binding(message: impl Into<String>, span: Span) -> Entity {
    Entity::error(FaultKind::MalformedBinding, message, span)
}

// Syntax

#[cold]
pub fn malformed_syntax(message: impl Into<String>, span: Span) -> Entity {
    Entity::error(FaultKind::MalformedSyntax, message, span)
}

#[cold]
pub fn stray_character(c: char, span: Span) -> Entity {
    Entity::error(
        FaultKind::MalformedSyntax,
        format!("unexpected `{c}`; write `\\{c}` for a literal"),
        span,
    )
}

// Evaluation limits

#[cold]
pub fn read_ahead_unavailable(span: Span) -> Entity {
    Entity::error(
        FaultKind::ReadAheadUnavailable,
        "read-ahead needs source text, and none follows here",
        span,
    )
}

#[cold]
pub fn recursion_limit(name: &Name, limit: usize, span: Span) -> Entity {
    Entity::error(
        FaultKind::RecursionLimit,
        format!("invoking `{name}` exceeds the call depth limit of {limit}"),
        span,
    )
}
