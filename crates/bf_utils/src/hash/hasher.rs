//! A seeded, deterministic hasher.
//!
//! Mappings built with it iterate in the same order from run to run, which
//! keeps flattened output and log lines reproducible.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x6B1D_3A0E_C4F2_9917);

/// The hasher produced by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// [`BuildHasher`] whose output depends only on the hashed input.
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use bf_utils::hash::FixedHashState;
///
/// let hash = |s: &str| {
///     let mut hasher = FixedHashState.build_hasher();
///     s.hash(&mut hasher);
///     hasher.finish()
/// };
///
/// assert_eq!(hash("field"), hash("field"));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

#[cfg(test)]
mod tests {
    use super::super::HashMap;
    use super::FixedHashState;

    #[test]
    fn iteration_order_is_stable() {
        let build = || {
            let mut map = HashMap::with_hasher(FixedHashState);
            for key in ["x", "y", "z", "alpha", "beta"] {
                map.insert(key, key.len());
            }
            map.into_iter().collect::<Vec<_>>()
        };
        assert_eq!(build(), build());
    }
}
