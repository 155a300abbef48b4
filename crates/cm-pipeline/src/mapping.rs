//! Identifier → token mapping.
//!
//! [`MappingBuilder`] assigns each distinct identifier exactly one token and
//! never reassigns it. [`Mapping`] is the frozen result consumed by the
//! rewrite phase.
//!
//! # Uniqueness
//!
//! Tokens are unique across both namespaces. A generated token that is
//! already assigned is discarded and another one drawn, up to
//! [`MAX_TOKEN_ATTEMPTS`] times per identifier. A batch that cannot fit in
//! the alphanumeric token space at the configured length is rejected before
//! any token is drawn.

use cm_core::{
    FxHashMap, FxHashSet, Identifier, IdentifierKind, IdentifierSet, ReplacementToken, fx_hash_set,
};
use cm_patterns::{Extraction, TokenLookup};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::trace;

use crate::error::MappingError;
use crate::generator::NameGenerator;

/// Tokens drawn per identifier before giving up.
pub const MAX_TOKEN_ATTEMPTS: usize = 64;

/// Size of the token alphabet (`a-z`, `A-Z`, `0-9`).
const ALPHABET_SIZE: u128 = 62;

/// Number of distinct tokens of `length` characters, saturating.
fn token_space(length: usize) -> u128 {
    u32::try_from(length)
        .ok()
        .and_then(|exp| ALPHABET_SIZE.checked_pow(exp))
        .unwrap_or(u128::MAX)
}

/// Tokens for one namespace, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TokenTable {
    order: Vec<String>,
    tokens: FxHashMap<String, ReplacementToken>,
}

impl TokenTable {
    fn get(&self, name: &str) -> Option<&ReplacementToken> {
        self.tokens.get(name)
    }

    fn insert(&mut self, name: &str, token: ReplacementToken) {
        self.order.push(name.to_owned());
        self.tokens.insert(name.to_owned(), token);
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &ReplacementToken)> {
        self.order
            .iter()
            .filter_map(|name| self.tokens.get(name).map(|token| (name.as_str(), token)))
    }
}

impl Serialize for TokenTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for (name, token) in self.iter() {
            map.serialize_entry(name, token)?;
        }
        map.end()
    }
}

/// The finalized, run-scoped identifier → token mapping.
///
/// Serializes as `{"class_names": {...}, "element_ids": {...}}` with entries
/// in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Mapping {
    class_names: TokenTable,
    element_ids: TokenTable,
}

impl Mapping {
    const fn table(&self, kind: IdentifierKind) -> &TokenTable {
        match kind {
            IdentifierKind::ClassName => &self.class_names,
            IdentifierKind::ElementId => &self.element_ids,
        }
    }

    /// Returns the token assigned to an identifier.
    #[must_use]
    pub fn get(&self, kind: IdentifierKind, name: &str) -> Option<&ReplacementToken> {
        self.table(kind).get(name)
    }

    /// Iterates one namespace's entries in discovery order.
    pub fn iter(&self, kind: IdentifierKind) -> impl Iterator<Item = (&str, &ReplacementToken)> {
        self.table(kind).iter()
    }

    /// Number of identifiers in one namespace.
    #[must_use]
    pub fn count(&self, kind: IdentifierKind) -> usize {
        self.table(kind).order.len()
    }

    /// Total number of mapped identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.class_names.order.len() + self.element_ids.order.len()
    }

    /// Returns `true` if nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TokenLookup for Mapping {
    fn token_for(&self, kind: IdentifierKind, name: &str) -> Option<&str> {
        self.get(kind, name).map(ReplacementToken::as_str)
    }
}

/// Assigns replacement tokens to discovered identifiers.
///
/// # Examples
///
/// ```
/// use cm_core::IdentifierKind;
/// use cm_pipeline::{MappingBuilder, RandomNameGenerator};
///
/// let mut builder = MappingBuilder::new(RandomNameGenerator::seeded(1), 8);
/// assert!(builder.assign(IdentifierKind::ClassName, "card")?);
/// assert!(!builder.assign(IdentifierKind::ClassName, "card")?);
/// assert!(builder.assign(IdentifierKind::ElementId, "card")?);
///
/// let mapping = builder.finish();
/// assert_eq!(mapping.len(), 2);
/// assert_ne!(
///     mapping.get(IdentifierKind::ClassName, "card"),
///     mapping.get(IdentifierKind::ElementId, "card"),
/// );
/// # Ok::<(), cm_pipeline::MappingError>(())
/// ```
#[derive(Debug)]
pub struct MappingBuilder<G> {
    generator: G,
    token_length: usize,
    mapping: Mapping,
    assigned: FxHashSet<ReplacementToken>,
}

impl<G: NameGenerator> MappingBuilder<G> {
    /// Creates a builder drawing `token_length`-character tokens from `generator`.
    #[must_use]
    pub fn new(generator: G, token_length: usize) -> Self {
        Self {
            generator,
            token_length,
            mapping: Mapping::default(),
            assigned: fx_hash_set(),
        }
    }

    /// Assigns a token to an identifier unless it already has one.
    ///
    /// Returns `true` if a new token was assigned.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::TokenSpaceExhausted`] if no unused token was
    /// drawn within [`MAX_TOKEN_ATTEMPTS`].
    pub fn assign(&mut self, kind: IdentifierKind, name: &str) -> Result<bool, MappingError> {
        if self.mapping.get(kind, name).is_some() {
            return Ok(false);
        }

        for _ in 0..MAX_TOKEN_ATTEMPTS {
            let token = self.generator.generate(self.token_length);
            if self.assigned.insert(token.clone()) {
                trace!(%kind, name, %token, "Assigned token");
                match kind {
                    IdentifierKind::ClassName => self.mapping.class_names.insert(name, token),
                    IdentifierKind::ElementId => self.mapping.element_ids.insert(name, token),
                }
                return Ok(true);
            }
        }

        Err(MappingError::TokenSpaceExhausted {
            identifier: Identifier::new(kind, name),
            length: self.token_length,
            attempts: MAX_TOKEN_ATTEMPTS,
        })
    }

    /// Assigns tokens to every name in a set, in order.
    ///
    /// Returns how many new tokens were assigned.
    pub fn assign_all(
        &mut self,
        kind: IdentifierKind,
        names: &IdentifierSet,
    ) -> Result<usize, MappingError> {
        let mut added = 0;
        for name in names.iter() {
            if self.assign(kind, name)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Fails if `additional` more identifiers cannot all get distinct tokens.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::TokenSpaceTooSmall`] when the identifiers
    /// already assigned plus `additional` exceed the number of possible
    /// tokens at the configured length.
    pub fn reserve(&self, additional: usize) -> Result<(), MappingError> {
        let needed = self.assigned.len().saturating_add(additional);
        let available = token_space(self.token_length);
        if u128::try_from(needed).unwrap_or(u128::MAX) > available {
            return Err(MappingError::TokenSpaceTooSmall {
                length: self.token_length,
                needed,
                available,
            });
        }
        Ok(())
    }

    /// Assigns tokens to every class name, then every element ID.
    ///
    /// The whole batch is checked with [`reserve`](Self::reserve) first.
    pub fn assign_extraction(&mut self, found: &Extraction) -> Result<usize, MappingError> {
        self.reserve(found.len())?;
        let classes = self.assign_all(IdentifierKind::ClassName, &found.class_names)?;
        let ids = self.assign_all(IdentifierKind::ElementId, &found.element_ids)?;
        Ok(classes + ids)
    }

    /// Freezes the mapping.
    #[must_use]
    pub fn finish(self) -> Mapping {
        self.mapping
    }
}
