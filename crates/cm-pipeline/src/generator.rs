//! Replacement token generation.
//!
//! Tokens are drawn uniformly from the 62-symbol alphanumeric alphabet
//! (`a-z`, `A-Z`, `0-9`). A generator makes no uniqueness promise on its
//! own; [`MappingBuilder`](crate::MappingBuilder) rejects repeats.

use cm_core::ReplacementToken;
use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of fresh replacement tokens.
pub trait NameGenerator {
    /// Produces a token of exactly `length` characters.
    fn generate(&mut self, length: usize) -> ReplacementToken;
}

impl<G: NameGenerator + ?Sized> NameGenerator for &mut G {
    fn generate(&mut self, length: usize) -> ReplacementToken {
        (**self).generate(length)
    }
}

/// Alphanumeric token generator backed by [`StdRng`].
///
/// # Examples
///
/// ```
/// use cm_pipeline::{NameGenerator, RandomNameGenerator};
///
/// let mut a = RandomNameGenerator::seeded(7);
/// let mut b = RandomNameGenerator::seeded(7);
/// let token = a.generate(8);
///
/// assert_eq!(token.len(), 8);
/// assert!(token.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
/// assert_eq!(token, b.generate(8));
/// ```
#[derive(Debug, Clone)]
pub struct RandomNameGenerator {
    rng: StdRng,
}

impl RandomNameGenerator {
    /// Creates a generator with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a generator seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded when `seed` is set, entropy-backed otherwise.
    #[must_use]
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl NameGenerator for RandomNameGenerator {
    fn generate(&mut self, length: usize) -> ReplacementToken {
        let token: String = (&mut self.rng)
            .sample_iter(Alphanumeric)
            .take(length)
            .map(char::from)
            .collect();
        ReplacementToken::new(token)
    }
}
