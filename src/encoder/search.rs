// encoder/search.rs — match search over the block index. Migrated from
// the candidate-walk and byte-wise extension loop inside `diff_delta` in
// git's diff-delta.c.

use crate::config::MAX_COPY_SIZE;
use crate::index::BlockIndex;

/// Best COPY candidate found for a target window.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Match {
    pub len: u32,
    pub off: u32,
}

/// Extend a byte-wise match between `reference[ref_pos..]` and
/// `target[data..]`, capped at `max_len` bytes. Equivalent to the
/// `for (; csize && *ptr1 == *ptr2; ...)` loop in `diff_delta`.
#[inline]
fn extend(reference: &[u8], ref_pos: usize, target: &[u8], data: usize, max_len: usize) -> usize {
    let a = &reference[ref_pos..ref_pos + max_len];
    let b = &target[data..data + max_len];
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// Find the best COPY candidate for the target window starting at `data`,
/// whose leading block fingerprints as `fp`.
///
/// Candidates arrive in chain order (highest reference offset first).
/// Only a *strict* length improvement overwrites the current best, so
/// among equal-length matches the first one seen — the highest offset —
/// wins.
pub(crate) fn find_best_match(index: &BlockIndex, fp: u32, target: &[u8], data: usize) -> Match {
    let reference = index.reference();
    let target_remaining = target.len() - data;
    let mut best = Match::default();

    for ref_pos in index.candidates(fp) {
        let ref_remaining = reference.len() - ref_pos;
        let max_len = ref_remaining.min(target_remaining);
        let len = extend(reference, ref_pos, target, data, max_len);

        if len > best.len as usize {
            best.off = ref_pos as u32;
            if len >= MAX_COPY_SIZE as usize {
                best.len = MAX_COPY_SIZE;
                break;
            }
            best.len = len as u32;
        }
    }

    best
}
