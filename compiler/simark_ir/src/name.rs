//! Identifier names.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// A macro, binding, or argument name.
///
/// Cheap to clone (shared `Arc<str>`). Hashes like the underlying `str`, so
/// maps keyed by `Name` can be queried with a plain `&str`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Arc<str>);

impl Name {
    #[inline]
    pub fn new(name: &str) -> Self {
        Name(Arc::from(name))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Name {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    #[inline]
    fn from(name: &str) -> Self {
        Name::new(name)
    }
}

impl From<String> for Name {
    #[inline]
    fn from(name: String) -> Self {
        Name(Arc::from(name))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(Name::new("title"), 1);
        assert_eq!(map.get("title"), Some(&1));
        assert_eq!(map.get("other"), None);
    }

    #[test]
    fn test_display_and_debug() {
        let name = Name::from("h");
        assert_eq!(name.to_string(), "h");
        assert_eq!(format!("{name:?}"), "`h`");
    }
}
