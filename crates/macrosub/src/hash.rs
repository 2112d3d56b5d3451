//! String hashing and seeded random-generator construction.
//!
//! Deterministic picks and dice rolls both bottom out here: a 64-bit
//! FNV-1a hash binds text to a stable integer, and [`rng_from_seed`]
//! turns either such an integer or OS entropy into a generator.

use const_fnv1a_hash::fnv1a_hash_str_64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Stable 64-bit FNV-1a hash of a string.
///
/// Same input always produces the same hash, across runs and reloads,
/// which is what makes content-seeded picks reproducible.
///
/// # Example
///
/// ```
/// use macrosub::hash::string_hash;
///
/// assert_eq!(string_hash("chat-42"), string_hash("chat-42"));
/// assert_ne!(string_hash("chat-42"), string_hash("chat-43"));
/// ```
pub const fn string_hash(input: &str) -> u64 {
    fnv1a_hash_str_64(input)
}

/// Seed discipline for a random generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seed {
    /// Deterministic: the same seed yields the same draw sequence.
    Fixed(u64),
    /// Non-reproducible OS entropy.
    Entropy,
}

/// Construct a generator from a seed discipline.
pub fn rng_from_seed(seed: Seed) -> StdRng {
    match seed {
        Seed::Fixed(n) => StdRng::seed_from_u64(n),
        Seed::Entropy => StdRng::from_os_rng(),
    }
}

/// Draw a uniform index in `0..len` from a fresh generator.
///
/// The draw goes through a unit float in `[0, 1)` scaled by `len`, the
/// contract the host's RNG collaborator exposes. Returns `None` for an
/// empty range.
pub fn uniform_index(seed: Seed, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let mut rng = rng_from_seed(seed);
    let unit: f64 = rng.random();
    let index = (unit * len as f64) as usize;
    // The scaled value is strictly below len, but clamp against float edge cases.
    Some(index.min(len - 1))
}
