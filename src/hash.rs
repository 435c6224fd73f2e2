//! Deterministic multiplicative string hash.

const HASH_MULTIPLIER: usize = 65599;

/// Hash `key` into a bucket index in `0..bucket_count`.
///
/// Folds the key's bytes into a word-sized accumulator,
/// `h = h * 65599 + byte`, with wrapping arithmetic (overflow is part of the
/// mixing, not an error), then reduces modulo `bucket_count`. Pure and
/// deterministic: the same key always lands in the same bucket for a given
/// bucket count. The empty string hashes to bucket 0.
#[inline]
pub(crate) fn bucket_index(key: &str, bucket_count: usize) -> usize {
    let mut h: usize = 0;
    for &byte in key.as_bytes() {
        h = h.wrapping_mul(HASH_MULTIPLIER).wrapping_add(byte as usize);
    }
    h % bucket_count
}
