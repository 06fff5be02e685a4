//! The greedy delta encoder — fingerprints each target block, probes the
//! [`BlockIndex`], and serializes COPY/INSERT opcodes into a growable,
//! cap-bounded output buffer.
//!
//! Equivalent to `diff_delta` in diff-delta.c; `delta_prepare` /
//! `delta_cleanup` correspond to [`BlockIndex::build`] and its `Drop` impl
//! (RAII replaces the explicit cleanup call, the same substitution the
//! teacher makes for its own streaming types).

use std::fmt;

use crate::adler32::adler32;
use crate::arena::AllocError;
use crate::config::{
    DEFAULT_BLOCK_SIZE, INITIAL_OUTPUT_CAPACITY, OUTPUT_GROWTH_DEN, OUTPUT_GROWTH_NUM,
};
use crate::encoder::search::find_best_match;
use crate::encoder::types::{cost, write_copy, MAX_OP_SIZE};
use crate::index::{BlockIndex, IndexError};
use crate::util::varint::write_leb128;

/// Errors returned by [`diff_delta`] and [`diff_delta_with_block_size`].
///
/// The first three variants are the error kinds the core encoder
/// contract; `InvalidBlockSize` guards the block-size parameter this
/// crate's API adds on top of it (spec.md treats the block size as a
/// compile-time constant, so it has no corresponding failure mode there).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaError {
    /// Either the reference or the target buffer was empty.
    EmptyInput,
    /// An allocation failed while building the index or growing the output.
    OutOfMemory,
    /// `max_size` was exceeded while growing the output buffer.
    ExceedsCap,
    /// `block_size` was zero.
    InvalidBlockSize,
}

impl fmt::Display for DeltaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            DeltaError::EmptyInput => "reference or target buffer is empty",
            DeltaError::OutOfMemory => "allocation failed while building the delta",
            DeltaError::ExceedsCap => "delta exceeds the requested size cap",
            DeltaError::InvalidBlockSize => "block size must be nonzero",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for DeltaError {}

impl From<AllocError> for DeltaError {
    fn from(_: AllocError) -> Self {
        DeltaError::OutOfMemory
    }
}

impl From<IndexError> for DeltaError {
    fn from(e: IndexError) -> Self {
        match e {
            IndexError::InvalidBlockSize => DeltaError::InvalidBlockSize,
            IndexError::OutOfMemory => DeltaError::OutOfMemory,
        }
    }
}

/// Encode a delta that reconstructs `target` when applied to `reference`,
/// using [`DEFAULT_BLOCK_SIZE`]. `max_size` caps the delta's length; `0`
/// means unbounded.
pub fn diff_delta(reference: &[u8], target: &[u8], max_size: u64) -> Result<Vec<u8>, DeltaError> {
    diff_delta_with_block_size(reference, target, DEFAULT_BLOCK_SIZE, max_size)
}

/// Encode a delta with an explicit reference block size. `block_size`
/// should be a power of two in `[MIN_BLOCK_SIZE, MAX_BLOCK_SIZE]`; callers
/// that accept it from untrusted input should validate that range
/// themselves (see `cli::args`). `block_size == 0` is rejected here with
/// [`DeltaError::InvalidBlockSize`] rather than dividing by zero while
/// sizing the index.
pub fn diff_delta_with_block_size(
    reference: &[u8],
    target: &[u8],
    block_size: usize,
    max_size: u64,
) -> Result<Vec<u8>, DeltaError> {
    if reference.is_empty() || target.is_empty() {
        return Err(DeltaError::EmptyInput);
    }

    let index = BlockIndex::build(reference, block_size)?;

    let mut capacity = INITIAL_OUTPUT_CAPACITY;
    if max_size != 0 && capacity as u64 >= max_size {
        capacity = (max_size as usize).saturating_add(MAX_OP_SIZE + 1);
    }
    let mut out = Vec::new();
    out.try_reserve_exact(capacity)
        .map_err(|_| DeltaError::OutOfMemory)?;

    write_leb128(&mut out, reference.len() as u64);
    write_leb128(&mut out, target.len() as u64);

    let mut data = 0usize;
    let mut inscnt: usize = 0;
    let mut insert_tag_pos = 0usize;

    while data < target.len() {
        let block_len = index.block_size().min(target.len() - data);
        let fp = adler32(0, &target[data..data + block_len]);
        let m = find_best_match(&index, fp, target, data);

        if m.len == 0 || m.len < cost(m.off, m.len) {
            if inscnt == 0 {
                insert_tag_pos = out.len();
                out.push(0); // patched once the literal run ends
            }
            out.push(target[data]);
            data += 1;
            inscnt += 1;
            if inscnt == 0x7f {
                out[insert_tag_pos] = inscnt as u8;
                inscnt = 0;
            }
        } else {
            if inscnt != 0 {
                out[insert_tag_pos] = inscnt as u8;
                inscnt = 0;
            }
            write_copy(&mut out, m.off, m.len);
            data += m.len as usize;
        }

        if out.len() + MAX_OP_SIZE >= capacity {
            let mut new_capacity = capacity * OUTPUT_GROWTH_NUM / OUTPUT_GROWTH_DEN;
            if max_size != 0 && new_capacity as u64 >= max_size {
                new_capacity = (max_size as usize).saturating_add(MAX_OP_SIZE + 1);
            }
            if max_size != 0 && out.len() as u64 > max_size {
                return Err(DeltaError::ExceedsCap);
            }
            let additional = new_capacity.saturating_sub(out.len());
            out.try_reserve_exact(additional)
                .map_err(|_| DeltaError::OutOfMemory)?;
            capacity = new_capacity;
        }
    }

    if inscnt != 0 {
        out[insert_tag_pos] = inscnt as u8;
    }

    Ok(out)
}
