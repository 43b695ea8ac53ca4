//! The universal document value.
//!
//! Every piece of a document is an [`Entity`]: literal text, structural
//! containers, invocations, deferred references, and the error nodes that
//! mark faults. The evaluator matches on the variant set exhaustively, so a
//! new kind of value means a new variant here and a new arm there.

use crate::{FaultKind, Name, NamedEntities, Severity, Span};

/// Engine primitives that are values but not source text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Intrinsic {
    /// Consume one phrase of the source that follows the current invocation.
    ReadPhrase,
}

impl Intrinsic {
    /// The name the prelude binds this primitive to.
    pub fn prelude_name(self) -> &'static str {
        match self {
            Intrinsic::ReadPhrase => "phrase",
        }
    }
}

/// Target name plus named arguments, shared by `Call` and `Ref`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub name: Name,
    pub args: NamedEntities,
}

impl Invocation {
    pub fn new(name: Name, args: NamedEntities) -> Self {
        Invocation { name, args }
    }

    /// An invocation with no arguments.
    pub fn bare(name: impl Into<Name>) -> Self {
        Invocation {
            name: name.into(),
            args: NamedEntities::new(),
        }
    }
}

/// A recoverable fault, inlined into the tree where it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorNode {
    pub kind: FaultKind,
    pub message: String,
    pub span: Span,
    pub severity: Severity,
    /// Whatever was built around the fault site before it was detected.
    pub children: Vec<Entity>,
}

impl ErrorNode {
    #[cold]
    pub fn new(kind: FaultKind, message: impl Into<String>, span: Span) -> Self {
        ErrorNode {
            kind,
            message: message.into(),
            span,
            severity: Severity::Error,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Entity>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// The closed set of document values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    Text(String),
    Number(i64),
    /// `{ ... }` group; holds blocks.
    Nest(Vec<Entity>),
    /// Lines separated from the next block by a blank line.
    Block(Vec<Entity>),
    /// Phrases up to a newline.
    Line(Vec<Entity>),
    /// Units up to a `|`.
    Phrase(Vec<Entity>),
    /// Backtick-delimited text, taken without escaping.
    Verbatim(String),
    /// Immediate `\name[args]`.
    Call(Invocation),
    /// Deferred `~name[args]`, resolved each time it is invoked.
    Ref(Invocation),
    /// Stand-in for a parameter while its definition is still being parsed.
    Placeholder(Name),
    Intrinsic(Intrinsic),
    Error(Box<ErrorNode>),
}

impl Entity {
    #[inline]
    pub fn text(text: impl Into<String>) -> Self {
        Entity::Text(text.into())
    }

    /// The empty value: a phrase with no units.
    #[inline]
    pub fn empty() -> Self {
        Entity::Phrase(Vec::new())
    }

    pub fn call(name: impl Into<Name>, args: NamedEntities) -> Self {
        Entity::Call(Invocation::new(name.into(), args))
    }

    pub fn reference(name: impl Into<Name>, args: NamedEntities) -> Self {
        Entity::Ref(Invocation::new(name.into(), args))
    }

    #[cold]
    pub fn error(kind: FaultKind, message: impl Into<String>, span: Span) -> Self {
        Entity::Error(Box::new(ErrorNode::new(kind, message, span)))
    }

    /// Variant name, for logs and renderer node kinds.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Entity::Text(_) => "text",
            Entity::Number(_) => "number",
            Entity::Nest(_) => "nest",
            Entity::Block(_) => "block",
            Entity::Line(_) => "line",
            Entity::Phrase(_) => "phrase",
            Entity::Verbatim(_) => "verbatim",
            Entity::Call(_) => "call",
            Entity::Ref(_) => "ref",
            Entity::Placeholder(_) => "placeholder",
            Entity::Intrinsic(_) => "intrinsic",
            Entity::Error(_) => "error",
        }
    }

    /// Children of a structural container, `None` for everything else.
    pub fn children(&self) -> Option<&[Entity]> {
        match self {
            Entity::Nest(items)
            | Entity::Block(items)
            | Entity::Line(items)
            | Entity::Phrase(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        self.children().is_some()
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Entity::Error(_))
    }

    /// Text content if this is a `Text` or `Verbatim`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Entity::Text(text) | Entity::Verbatim(text) => Some(text),
            _ => None,
        }
    }

    /// Whether this value renders as nothing at all.
    pub fn is_blank(&self) -> bool {
        match self {
            Entity::Text(text) => text.is_empty(),
            Entity::Nest(items)
            | Entity::Block(items)
            | Entity::Line(items)
            | Entity::Phrase(items) => items.iter().all(Entity::is_blank),
            _ => false,
        }
    }

    /// Every error node reachable from here, in document order.
    ///
    /// Descends into containers, invocation arguments, and the children of
    /// error nodes themselves.
    pub fn faults(&self) -> Vec<&ErrorNode> {
        let mut out = Vec::new();
        collect_faults(self, &mut out);
        out
    }
}

fn collect_faults<'a>(entity: &'a Entity, out: &mut Vec<&'a ErrorNode>) {
    match entity {
        Entity::Nest(items) | Entity::Block(items) | Entity::Line(items) | Entity::Phrase(items) => {
            for item in items {
                collect_faults(item, out);
            }
        }
        Entity::Call(inv) | Entity::Ref(inv) => {
            for (_, arg) in inv.args.iter() {
                collect_faults(arg, out);
            }
        }
        Entity::Error(node) => {
            out.push(node);
            for child in &node.children {
                collect_faults(child, out);
            }
        }
        Entity::Text(_)
        | Entity::Number(_)
        | Entity::Verbatim(_)
        | Entity::Placeholder(_)
        | Entity::Intrinsic(_) => {}
    }
}

impl From<ErrorNode> for Entity {
    fn from(node: ErrorNode) -> Self {
        Entity::Error(Box::new(node))
    }
}
