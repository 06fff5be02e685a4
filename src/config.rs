//! Compile-time tunables for the delta encoder.
//!
//! Named constants migrated from the original source's macros, rather
//! than magic numbers scattered across call sites.

/// Smallest allowed block size.
pub const MIN_BLOCK_SIZE: usize = 16;
/// Largest allowed block size.
pub const MAX_BLOCK_SIZE: usize = 65_536;
/// Default block size. Equivalent to `BLK_SIZE` in diff-delta.c.
pub const DEFAULT_BLOCK_SIZE: usize = 16;

/// Initial output buffer capacity, before any growth.
pub const INITIAL_OUTPUT_CAPACITY: usize = 8192;

/// Numerator/denominator of the geometric growth factor (3/2) applied to
/// the output buffer whenever it runs low on headroom.
pub const OUTPUT_GROWTH_NUM: usize = 3;
pub const OUTPUT_GROWTH_DEN: usize = 2;

/// The distinguished COPY size that the wire format encodes as "all size
/// bytes absent".
pub const MAX_COPY_SIZE: u32 = 0x1_0000;
