// index/build.rs — block index construction and probing. Migrated from
// `delta_prepare` / `delta_cleanup` in git's diff-delta.c. `delta_cleanup`'s
// explicit teardown becomes `BlockIndex`'s `Drop` impl (via `Arena`), the
// same RAII substitution used for the arena itself.

use crate::adler32::adler32;
use crate::arena::{AllocError, Arena, ArenaIndex};
use crate::index::types::{bucket_of, hashbits, BlockRecord};

/// Errors returned by [`BlockIndex::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    /// `block_size` was zero, which would divide by zero while sizing
    /// the hash table.
    InvalidBlockSize,
    /// An allocation failed while building the bucket array or arena.
    OutOfMemory,
}

impl From<AllocError> for IndexError {
    fn from(_: AllocError) -> Self {
        IndexError::OutOfMemory
    }
}

/// Content-defined index over a reference buffer: an open-chained hash
/// table keyed by the Adler-32 fingerprint of each fixed-size block.
///
/// Within a bucket, the offset inserted last sits at the chain's head:
/// blocks are inserted ascending by offset, so the final (highest-offset)
/// insertion is always what a front-to-back walk meets first. The
/// encoder relies on this ordering for its tie-break policy: prefer the
/// highest offset among equal-length matches.
pub struct BlockIndex<'r> {
    reference: &'r [u8],
    block_size: usize,
    bits: u32,
    buckets: Vec<Option<ArenaIndex>>,
    arena: Arena<BlockRecord>,
}

impl<'r> BlockIndex<'r> {
    /// Build an index over `reference`, fingerprinting every `block_size`
    /// byte block from the start of the buffer forwards (the last block
    /// may be shorter than `block_size`) and inserting each into its
    /// bucket's chain head in that order, so the highest offset ends up
    /// at the head.
    ///
    /// `block_size` should be a power of two in `[MIN_BLOCK_SIZE,
    /// MAX_BLOCK_SIZE]`; callers validate the range themselves (the CLI
    /// rejects bad values explicitly, see `cli::args`). `block_size == 0`
    /// is rejected here with [`IndexError::InvalidBlockSize`] rather than
    /// left to panic or divide by zero, since this is public API that may
    /// be called with an unvalidated value in a release build.
    pub fn build(reference: &'r [u8], block_size: usize) -> Result<Self, IndexError> {
        if block_size == 0 {
            return Err(IndexError::InvalidBlockSize);
        }

        let bits = hashbits(reference.len() / block_size + 1);
        let bucket_count = 1usize << bits;

        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(bucket_count)
            .map_err(|_| AllocError)?;
        buckets.resize(bucket_count, None);

        // Chunk size mirrors cha_init's sizing exactly: `hsize / 4 + 1`
        // records per page.
        let records_per_chunk = bucket_count / 4 + 1;
        let mut arena = Arena::new(records_per_chunk);

        if reference.is_empty() {
            return Ok(BlockIndex {
                reference,
                block_size,
                bits,
                buckets,
                arena,
            });
        }

        // The last block may be shorter than `block_size`; every block
        // before it is exactly `block_size` long.
        let last_pos = if reference.len() % block_size == 0 {
            reference.len() - block_size
        } else {
            (reference.len() / block_size) * block_size
        };

        let mut insert = |pos: usize, arena: &mut Arena<BlockRecord>| -> Result<(), AllocError> {
            let len = block_size.min(reference.len() - pos);
            let fp = adler32(0, &reference[pos..pos + len]);
            let bucket = bucket_of(fp, bits);
            let idx = arena.alloc(BlockRecord {
                fp,
                pos,
                next: buckets[bucket],
            })?;
            buckets[bucket] = Some(idx);
            Ok(())
        };

        // Insert front-to-back (ascending offset) so that the *last*
        // insertion — the highest offset — ends up at each bucket's head.
        // Chains are prepended (`next = old head`), so processing order
        // controls which offset a front-to-back walk meets first; this
        // ascending build order is what makes the walk meet higher
        // reference offsets first.
        let mut pos = 0;
        while pos < last_pos {
            insert(pos, &mut arena)?;
            pos += block_size;
        }
        insert(last_pos, &mut arena)?;

        Ok(BlockIndex {
            reference,
            block_size,
            bits,
            buckets,
            arena,
        })
    }

    pub fn reference(&self) -> &'r [u8] {
        self.reference
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Iterate reference offsets whose block fingerprint equals `fp`, in
    /// chain order (highest reference offset first).
    pub(crate) fn candidates(&self, fp: u32) -> impl Iterator<Item = usize> + '_ {
        let mut cur = self.buckets[bucket_of(fp, self.bits)];
        std::iter::from_fn(move || loop {
            let idx = cur?;
            let rec = self.arena.get(idx);
            cur = rec.next;
            if rec.fp == fp {
                return Some(rec.pos);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_exact_block_match() {
        let reference = b"0123456789abcdef0123456789abcdef".to_vec();
        let index = BlockIndex::build(&reference, 16).unwrap();
        let fp = adler32(0, &reference[0..16]);
        let hits: Vec<usize> = index.candidates(fp).collect();
        assert!(hits.contains(&0));
        assert!(hits.contains(&16));
    }

    #[test]
    fn empty_reference_yields_empty_index() {
        let reference: Vec<u8> = Vec::new();
        let index = BlockIndex::build(&reference, 16).unwrap();
        assert_eq!(index.candidates(0).count(), 0);
    }

    #[test]
    fn zero_block_size_is_rejected_not_a_division_panic() {
        let reference = b"0123456789abcdef".to_vec();
        assert_eq!(
            BlockIndex::build(&reference, 0).unwrap_err(),
            IndexError::InvalidBlockSize
        );
    }

    #[test]
    fn chain_order_prefers_higher_offsets_first() {
        // Two identical blocks at offsets 0 and 16 share a bucket chain;
        // ascending-offset construction means offset 16 is inserted last,
        // landing at the chain head, so it is discovered before 0.
        let reference = [0u8; 32].to_vec();
        let index = BlockIndex::build(&reference, 16).unwrap();
        let fp = adler32(0, &reference[0..16]);
        let hits: Vec<usize> = index.candidates(fp).collect();
        assert_eq!(hits.first(), Some(&16));
    }
}
