use mfclassic::types::Block;
use proptest::prelude::*;

proptest! {
    #[test]
    fn value_block_layout(value in any::<i32>(), addr in any::<u8>()) {
        let block = Block::from_value(value, addr);
        prop_assert_eq!(block.value(), Some((value, addr)));
    }

    #[test]
    fn corrupted_value_block_is_rejected(value in any::<i32>(), byte in 0usize..16) {
        let mut bytes = *Block::from_value(value, 5).as_bytes();
        bytes[byte] ^= 0x10;
        prop_assert!(!Block::from_bytes(bytes).is_value_block());
    }
}

#[test]
fn known_value_block_image() {
    let block = Block::from_value(100, 5);
    assert_eq!(
        block.to_hex(),
        "640000009BFFFFFF6400000005FA05FA"
    );
}
