// fixtures.rs: commonly used keys, blocks and simulated cards

use mfclassic::protocol::{BitBuffer, append_crc_a};
use mfclassic::test_support::SimulatedCard;
use mfclassic::transport::mock::MockResponse;
use mfclassic::types::{Block, Key};

pub fn sector1_key_a() -> Key {
    Key::from_bytes([0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5])
}

pub fn sector1_key_b() -> Key {
    Key::from_bytes([0xB0, 0xB1, 0xB2, 0xB3, 0xB4, 0xB5])
}

pub fn sample_block(fill: u8) -> Block {
    Block::from_bytes([fill; 16])
}

pub fn counting_block() -> Block {
    Block::from_bytes(core::array::from_fn(|i| i as u8))
}

/// Blank card with dedicated keys on sector 1, a data block at 4 and a
/// value block holding 100 at 5.
pub fn sample_card() -> SimulatedCard {
    SimulatedCard::new()
        .with_sector_keys(1, sector1_key_a(), sector1_key_b())
        .with_block(4, counting_block())
        .with_value_block(5, 100)
}

pub fn ack() -> MockResponse {
    MockResponse::bits(&[0x0A], 4)
}

pub fn nak() -> MockResponse {
    MockResponse::bits(&[0x04], 4)
}

/// Block payload followed by its CRC_A, as the card sends it.
pub fn block_frame(block: &Block) -> MockResponse {
    let mut frame = BitBuffer::from_bytes(block.as_bytes());
    append_crc_a(&mut frame);
    MockResponse {
        frame,
        result: Ok(()),
    }
}
