//! Thin wrapper around the `adler` crate providing the Adler-32 checksum
//! (RFC 1950 §8.2) used to fingerprint reference and target blocks.
//! Mirrors `xxhash.rs`'s wrapper around `xxhash-rust`: the checksum itself
//! is treated as an external collaborator, not reimplemented here.

/// One-shot Adler-32 — equivalent to zlib's `adler32(seed, data, len)`.
/// `seed = 0` matches the value zlib and this crate's callers start from;
/// any length, including zero, is accepted.
#[inline]
pub fn adler32(seed: u32, data: &[u8]) -> u32 {
    let mut hasher = adler::Adler32::from_checksum(seed);
    hasher.write_slice(data);
    hasher.checksum()
}
