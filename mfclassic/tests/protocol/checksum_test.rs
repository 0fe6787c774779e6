use mfclassic::protocol::{BitBuffer, append_crc_a, check_crc_a, crc_a, trim_crc_a};
use proptest::prelude::*;

#[test]
fn crc_a_reference_vectors() {
    // HLTA and READ(4)
    assert_eq!(crc_a(&[0x50, 0x00]), 0xCD57);
    assert_eq!(crc_a(&[0x30, 0x04]).to_le_bytes(), [0x26, 0xEE]);
}

#[test]
fn check_rejects_short_and_partial_frames() {
    assert!(!check_crc_a(&BitBuffer::from_bytes(&[0x63, 0x63])));
    assert!(!check_crc_a(&BitBuffer::from_bits(&[0x0A], 4)));
    assert!(!check_crc_a(&BitBuffer::new()));
}

proptest! {
    #[test]
    fn appended_crc_checks(payload in prop::collection::vec(any::<u8>(), 1..32)) {
        let mut buf = BitBuffer::from_bytes(&payload);
        append_crc_a(&mut buf);
        prop_assert!(check_crc_a(&buf));
        trim_crc_a(&mut buf);
        prop_assert_eq!(buf.data(), &payload[..]);
    }

    #[test]
    fn single_bit_errors_are_detected(
        payload in prop::collection::vec(any::<u8>(), 1..32),
        bit in 0usize..256,
    ) {
        let mut buf = BitBuffer::from_bytes(&payload);
        append_crc_a(&mut buf);
        let mut bytes = buf.data().to_vec();
        let bit = bit % (bytes.len() * 8);
        bytes[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!check_crc_a(&BitBuffer::from_bytes(&bytes)));
    }
}
