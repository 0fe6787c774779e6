//! Dump a simulated MIFARE Classic 1K card with the default keys.
//!
//! Usage:
//!   RUST_LOG=debug cargo run -p mfclassic --example simulated_dump

use mfclassic::prelude::*;
use mfclassic::test_support::{SimulatedCard, simulated_poller};
use mfclassic::types::first_block_of;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let card = SimulatedCard::new()
        .with_value_block(1, 42)
        .with_sector_keys(2, Key::from_u64(0xA0A1_A2A3_A4A5), Key::DEFAULT);
    let mut poller = simulated_poller(card);
    println!(
        "UID {} ATQA {} SAK {:02X}",
        poller.card_data().uid.to_hex(),
        hex::encode_upper(poller.card_data().atqa),
        poller.card_data().sak
    );

    for sector in 0..16u8 {
        let first = first_block_of(sector);
        poller.transport_mut().select();
        if let Err(e) = poller.auth(first, &Key::DEFAULT, KeyType::A, None, AuthFlags::new()) {
            println!("sector {:2}: key A {} rejected ({})", sector, Key::DEFAULT.to_hex(), e);
            continue;
        }
        for block in first..first + 4 {
            let data = poller.read_block(block)?;
            match data.value() {
                Some((value, addr)) => {
                    println!("{:3}: {} value {} addr {}", block, data.to_hex(), value, addr)
                }
                None => println!("{:3}: {}", block, data.to_hex()),
            }
        }
        poller.halt()?;
    }
    Ok(())
}
