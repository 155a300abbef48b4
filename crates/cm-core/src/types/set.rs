//! Insertion-ordered identifier sets.

use serde::{Serialize, Serializer};

use crate::hash::{FxHashSet, fx_hash_set};

/// A deduplicated set of identifier strings that remembers discovery order.
///
/// Hash sets iterate in an unspecified order; keeping the first-seen order
/// makes token assignment reproducible when the generator is seeded.
///
/// # Examples
///
/// ```
/// use cm_core::IdentifierSet;
///
/// let mut set = IdentifierSet::new();
/// assert!(set.insert("nav"));
/// assert!(set.insert("card"));
/// assert!(!set.insert("nav"));
///
/// let names: Vec<&str> = set.iter().collect();
/// assert_eq!(names, ["nav", "card"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierSet {
    order: Vec<String>,
    seen: FxHashSet<String>,
}

impl IdentifierSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            seen: fx_hash_set(),
        }
    }

    /// Inserts a name, returning `true` if it was not already present.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_owned());
        self.order.push(name.to_owned());
        true
    }

    /// Adds every name from `other`, keeping this set's order first.
    pub fn extend_from(&mut self, other: &Self) {
        for name in other.iter() {
            self.insert(name);
        }
    }

    /// Returns `true` if the name is present.
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    /// Number of distinct names.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no names have been inserted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates names in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for IdentifierSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl Serialize for IdentifierSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.order.serialize(serializer)
    }
}
