//! Key hashing: unseeded polynomial accumulation over the key bytes.

const MULTIPLIER: u64 = 31;

/// Hash a key as `h = h * 31 + byte` over its UTF-8 bytes, wrapping.
///
/// Deterministic across runs and platforms; not resistant to crafted
/// collisions.
#[inline]
pub fn hash(key: &str) -> u64 {
    key.bytes()
        .fold(0u64, |h, b| h.wrapping_mul(MULTIPLIER).wrapping_add(u64::from(b)))
}

/// Slot a key with hash `hash` would occupy in a table of `capacity` slots.
#[inline]
pub(crate) fn home_index(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (hash % capacity as u64) as usize
}
