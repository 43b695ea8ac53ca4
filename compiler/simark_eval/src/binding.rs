//! Binding records stored in scope frames.

use std::sync::Arc;

use simark_ir::{Entity, Name, NamedEntities};

/// Where a binding was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingScope {
    /// `[name=...]`, lives in the innermost local frame.
    Local,
    /// `[[name=...]]`, lives in the global root (or the overlay while isolated).
    Global,
}

/// A named value together with its own default-argument table.
///
/// The value is shared: two bindings can point at the same entity while
/// owning independent defaults. Defaults are never shared.
#[derive(Clone, Debug)]
pub struct Binding {
    pub name: Name,
    pub value: Arc<Entity>,
    pub defaults: NamedEntities,
    pub scope: BindingScope,
}

impl Binding {
    pub fn new(name: Name, value: Entity, defaults: NamedEntities, scope: BindingScope) -> Self {
        Binding {
            name,
            value: Arc::new(value),
            defaults,
            scope,
        }
    }

    /// A local binding with no parameters, as built for call frames.
    pub fn local(name: Name, value: Entity) -> Self {
        Self::new(name, value, NamedEntities::new(), BindingScope::Local)
    }

    /// Stand-in for a parameter whose real value only exists once a call
    /// frame is built. Invoking it yields a `Ref` to the parameter.
    pub fn placeholder(name: Name) -> Self {
        let value = Entity::Placeholder(name.clone());
        Self::local(name, value)
    }

    /// Same value under another name and another defaults table.
    #[must_use]
    pub fn alias(&self, name: Name, defaults: NamedEntities) -> Self {
        Binding {
            name,
            value: Arc::clone(&self.value),
            defaults,
            scope: self.scope,
        }
    }

    /// Whether both bindings point at the very same value entity.
    pub fn shares_value_with(&self, other: &Binding) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(*self.value, Entity::Placeholder(_))
    }

    /// Parameter names, in declaration order.
    pub fn parameters(&self) -> impl Iterator<Item = &Name> {
        self.defaults.names()
    }
}
