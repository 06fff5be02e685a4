// Integration tests for the encoder's public API.

use delta::{diff_delta, DeltaError};

#[test]
fn output_begins_with_leb128_header() {
    let reference = b"0123456789abcdef".to_vec();
    let target = b"0123456789abcdef".to_vec();
    let delta = diff_delta(&reference, &target, 0).unwrap();

    // Both sizes fit in one LEB128 byte (16 < 128).
    assert_eq!(delta[0], 16);
    assert_eq!(delta[1], 16);
}

#[test]
fn larger_sizes_use_multi_byte_leb128() {
    let reference = vec![b'a'; 200];
    let target = vec![b'a'; 200];
    let delta = diff_delta(&reference, &target, 0).unwrap();

    // 200 = 0b1100_1000 -> low 7 bits 0b100_1000 = 0x48, continuation set,
    // remaining bits 0b1 = 1.
    assert_eq!(delta[0], 0x48 | 0x80);
    assert_eq!(delta[1], 0x01);
}

#[test]
fn exceeding_a_tiny_cap_reports_exceeds_cap_not_a_panic() {
    let reference = vec![1u8; 8192];
    let target = vec![2u8; 8192];
    let err = diff_delta(&reference, &target, 8).unwrap_err();
    assert_eq!(err, DeltaError::ExceedsCap);
}

#[test]
fn same_inputs_produce_byte_identical_deltas() {
    let reference = b"lorem ipsum dolor sit amet consectetur".to_vec();
    let target = b"lorem ipsum dolor sit amet adipiscing".to_vec();
    let first = diff_delta(&reference, &target, 0).unwrap();
    let second = diff_delta(&reference, &target, 0).unwrap();
    assert_eq!(first, second);
}
