use mfclassic::protocol::{BitBuffer, odd_parity};

#[test]
fn seven_bit_short_frame() {
    let buf = BitBuffer::from_bits(&[0xC0], 7);
    assert_eq!(buf.size_bits(), 7);
    assert_eq!(buf.size_bytes(), 1);
    // The unused top bit is cleared
    assert_eq!(buf.byte(0), Some(0x40));
}

#[test]
fn parity_is_odd_per_byte() {
    let buf = BitBuffer::from_bytes(&[0x00, 0x01, 0xFF]);
    assert_eq!(buf.parity(), &[true, false, true]);
    assert!(odd_parity(0x03));
}

#[test]
fn load_keeps_supplied_parity() {
    let mut buf = BitBuffer::new();
    buf.load(&[0x00, 0x01], &[false, true], 16);
    assert_eq!(buf.parity(), &[false, true]);
    assert_eq!(buf.to_hex(), "0001");
}

#[test]
fn append_after_partial_byte_realigns() {
    let mut buf = BitBuffer::from_bits(&[0x0A], 4);
    buf.append_bytes(&[0xFF]);
    assert_eq!(buf.size_bits(), 16);
    assert_eq!(buf.data(), &[0x0A, 0xFF]);
}
