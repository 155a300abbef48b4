//! Fx-hashed map and set aliases.
//!
//! Identifier and token lookups are string-keyed and never exposed to
//! untrusted hash-flooding input beyond the files being processed, so the
//! `rustc-hash` Fx algorithm is used throughout the workspace.
//!
//! ```
//! use cm_core::{FxHashMap, fx_hash_set};
//!
//! let mut tokens: FxHashMap<String, String> = FxHashMap::default();
//! tokens.insert("card".to_owned(), "aZ3kQ9xB".to_owned());
//!
//! let mut seen = fx_hash_set();
//! assert!(seen.insert("card"));
//! assert!(!seen.insert("card"));
//! ```

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;

/// Creates a new empty [`FxHashSet`].
#[inline]
#[must_use]
pub fn fx_hash_set<V>() -> FxHashSet<V> {
    FxHashSet::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fx_hash_set_dedups() {
        let mut set: FxHashSet<&str> = fx_hash_set();
        assert!(set.insert("card"));
        assert!(!set.insert("card"));
        assert_eq!(set.len(), 1);
    }
}
