// Integration tests for the delta applier.

use delta::{apply_delta, ApplyError};

#[test]
fn insert_only_delta_reconstructs_literal_bytes() {
    // header: ref_size=1, target_size=5, then a single INSERT of 5 bytes.
    let mut delta = vec![1, 5, 5];
    delta.extend_from_slice(b"hello");
    let reference = b"x".to_vec();
    assert_eq!(apply_delta(&reference, &delta).unwrap(), b"hello");
}

#[test]
fn copy_only_delta_reconstructs_from_reference() {
    let reference = b"0123456789abcdef".to_vec();
    // header: ref_size=16, target_size=16, then COPY off=0 size=16.
    let delta = vec![16, 16, 0x90, 0x10];
    assert_eq!(apply_delta(&reference, &delta).unwrap(), reference);
}

#[test]
fn zero_size_bitmap_means_max_copy_size() {
    let reference = vec![b'z'; 0x1_0000];
    // header: ref_size=0x10000 (LEB128 multi-byte), target_size likewise.
    let mut delta = Vec::new();
    delta.extend_from_slice(&[0x80, 0x80, 0x04]); // 0x10000 LEB128
    delta.extend_from_slice(&[0x80, 0x80, 0x04]);
    delta.push(0x80); // COPY, off=0, size bitmap absent -> 0x10000
    let restored = apply_delta(&reference, &delta).unwrap();
    assert_eq!(restored.len(), 0x1_0000);
    assert!(restored.iter().all(|&b| b == b'z'));
}

#[test]
fn target_size_mismatch_is_detected() {
    // header claims target_size=99 but only one byte is inserted.
    let delta = vec![1, 99, 1, b'x'];
    let reference = b"x".to_vec();
    assert_eq!(
        apply_delta(&reference, &delta),
        Err(ApplyError::TargetSizeMismatch)
    );
}
