//! Ordered name-to-entity tables.
//!
//! Arguments and defaults are named-only and keep their source order, so
//! read-ahead defaults are forced in the order they were declared. Tables are
//! small (a handful of parameters), so a linear scan over a `Vec` beats a
//! hash map here.

use crate::{Entity, Name};

/// Returned by [`NamedEntities::try_insert`] when the key already exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateName {
    pub name: Name,
    pub value: Entity,
}

/// Ordered map with unique keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamedEntities {
    entries: Vec<(Name, Entity)>,
}

impl NamedEntities {
    #[inline]
    pub fn new() -> Self {
        NamedEntities {
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entries
            .iter()
            .find(|(key, _)| key.as_str() == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert a new key. An existing key is left untouched and the rejected
    /// pair is handed back.
    pub fn try_insert(&mut self, name: Name, value: Entity) -> Result<(), DuplicateName> {
        if self.contains(name.as_str()) {
            return Err(DuplicateName { name, value });
        }
        self.entries.push((name, value));
        Ok(())
    }

    /// Insert or overwrite. An overwritten key keeps its original position.
    pub fn set(&mut self, name: Name, value: Entity) {
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Entity)> {
        self.entries.iter().map(|(name, value)| (name, value))
    }

    pub fn names(&self) -> impl Iterator<Item = &Name> {
        self.entries.iter().map(|(name, _)| name)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entries.iter_mut().map(|(_, value)| value)
    }

    /// Rebuild every value, keeping keys and order.
    pub fn map_values<E>(
        self,
        mut f: impl FnMut(&Name, Entity) -> Result<Entity, E>,
    ) -> Result<Self, E> {
        let mut entries = Vec::with_capacity(self.entries.len());
        for (name, value) in self.entries {
            let value = f(&name, value)?;
            entries.push((name, value));
        }
        Ok(NamedEntities { entries })
    }
}

impl IntoIterator for NamedEntities {
    type Item = (Name, Entity);
    type IntoIter = std::vec::IntoIter<(Name, Entity)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(Name, Entity)> for NamedEntities {
    /// Later duplicates overwrite earlier ones in place.
    fn from_iter<I: IntoIterator<Item = (Name, Entity)>>(iter: I) -> Self {
        let mut table = NamedEntities::new();
        for (name, value) in iter {
            table.set(name, value);
        }
        table
    }
}
