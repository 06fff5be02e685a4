//! Delta applier — the matching decoder for the wire format produced by
//! [`crate::encoder`].
//!
//! Not part of the core encoder's scope, but included so the round-trip
//! between encoding and applying is checkable end-to-end rather than only
//! assertable about wire bytes. Opcode parsing follows the same bit layout
//! and bounds-checked style as `git-pack`'s delta instruction parser,
//! adapted to this crate's `Display`/`std::error::Error` error style.

use std::fmt;

use crate::util::varint::read_leb128;

/// Errors returned by [`apply_delta`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyError {
    /// The delta stream ended before a complete header or opcode.
    Truncated,
    /// A COPY opcode set the reserved bit, or referenced bytes outside the
    /// reference buffer; or an INSERT opcode used the reserved zero tag.
    Malformed,
    /// The header's reference size did not match the supplied reference.
    ReferenceSizeMismatch,
    /// The reconstructed output did not match the header's target size.
    TargetSizeMismatch,
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ApplyError::Truncated => "delta stream ended unexpectedly",
            ApplyError::Malformed => "delta stream contains an invalid opcode",
            ApplyError::ReferenceSizeMismatch => {
                "reference buffer size does not match delta header"
            }
            ApplyError::TargetSizeMismatch => {
                "reconstructed output size does not match delta header"
            }
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ApplyError {}

/// Reconstruct the target buffer by applying `delta` to `reference`.
pub fn apply_delta(reference: &[u8], delta: &[u8]) -> Result<Vec<u8>, ApplyError> {
    let mut pos = 0usize;

    let (ref_size, consumed) = read_leb128(delta).ok_or(ApplyError::Truncated)?;
    pos += consumed;
    if ref_size as usize != reference.len() {
        return Err(ApplyError::ReferenceSizeMismatch);
    }

    let (target_size, consumed) = read_leb128(&delta[pos..]).ok_or(ApplyError::Truncated)?;
    pos += consumed;

    let mut out = Vec::with_capacity(target_size.min(1 << 20) as usize);

    while pos < delta.len() {
        let tag = delta[pos];
        pos += 1;

        if tag & 0x80 != 0 {
            // bit 6 is reserved; this applier rejects it rather than
            // silently ignoring it.
            if tag & 0x40 != 0 {
                return Err(ApplyError::Malformed);
            }

            let mut offset: u32 = 0;
            for i in 0..4u32 {
                if tag & (0x01 << i) != 0 {
                    let byte = *delta.get(pos).ok_or(ApplyError::Truncated)?;
                    offset |= (byte as u32) << (8 * i);
                    pos += 1;
                }
            }

            let mut size: u32 = 0;
            for i in 0..2u32 {
                if tag & (0x10 << i) != 0 {
                    let byte = *delta.get(pos).ok_or(ApplyError::Truncated)?;
                    size |= (byte as u32) << (8 * i);
                    pos += 1;
                }
            }
            if size == 0 {
                size = 0x1_0000;
            }

            let start = offset as usize;
            let end = start.checked_add(size as usize).ok_or(ApplyError::Malformed)?;
            let slice = reference.get(start..end).ok_or(ApplyError::Malformed)?;
            out.extend_from_slice(slice);
        } else if tag != 0 {
            let n = tag as usize;
            let slice = delta.get(pos..pos + n).ok_or(ApplyError::Truncated)?;
            out.extend_from_slice(slice);
            pos += n;
        } else {
            // tag == 0 is the reserved INSERT-of-zero-bytes encoding.
            return Err(ApplyError::Malformed);
        }
    }

    if out.len() as u64 != target_size {
        return Err(ApplyError::TargetSizeMismatch);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::diff_delta;

    #[test]
    fn round_trips_through_the_encoder() {
        let reference = b"the quick brown fox jumps over the lazy dog".to_vec();
        let target = b"the quick brown fox jumps over the lazy cat".to_vec();
        let delta = diff_delta(&reference, &target, 0).unwrap();
        let restored = apply_delta(&reference, &delta).unwrap();
        assert_eq!(restored, target);
    }

    #[test]
    fn round_trips_identity() {
        let reference = b"hello world".to_vec();
        let delta = diff_delta(&reference, &reference, 0).unwrap();
        let restored = apply_delta(&reference, &delta).unwrap();
        assert_eq!(restored, reference);
    }

    #[test]
    fn rejects_reserved_bit6() {
        let delta = vec![1, 1, 0b1100_0000];
        let reference = b"x".to_vec();
        assert_eq!(apply_delta(&reference, &delta), Err(ApplyError::Malformed));
    }

    #[test]
    fn rejects_reserved_zero_tag() {
        let delta = vec![1, 1, 0x00];
        let reference = b"x".to_vec();
        assert_eq!(apply_delta(&reference, &delta), Err(ApplyError::Malformed));
    }

    #[test]
    fn rejects_out_of_bounds_copy() {
        // off=200, size byte present (0x10) -> bitmap 0x90, no offset bytes.
        let delta = vec![1, 1, 0x90, 0xC8];
        let reference = b"x".to_vec();
        assert_eq!(apply_delta(&reference, &delta), Err(ApplyError::Malformed));
    }

    #[test]
    fn rejects_reference_size_mismatch() {
        let delta = vec![5, 1, 0x01, b'x'];
        let reference = b"x".to_vec();
        assert_eq!(
            apply_delta(&reference, &delta),
            Err(ApplyError::ReferenceSizeMismatch)
        );
    }
}
