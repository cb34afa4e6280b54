//! Content hashing for the parse cache.
//!
//! The tree provider keys cached syntax trees by document URI and checks the
//! FNV-1a hash of the text to decide whether the cached tree is still current.

/// Compute the FNV-1a 64-bit hash of document text.
///
/// Non-cryptographic; only used to detect that a document changed between
/// two navigation calls.
///
/// ```
/// use stepstone::text::fnv1a_hash;
///
/// assert_eq!(fnv1a_hash("x = 1\n"), fnv1a_hash("x = 1\n"));
/// assert_ne!(fnv1a_hash("x = 1\n"), fnv1a_hash("x = 2\n"));
/// ```
#[inline]
pub fn fnv1a_hash(text: &str) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    text.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
    })
}
