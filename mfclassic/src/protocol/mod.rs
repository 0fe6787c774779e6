// mfclassic/src/protocol/mod.rs

pub mod bit_buffer;
pub mod checksum;
pub mod command;

pub use bit_buffer::{BitBuffer, odd_parity};
pub use checksum::{append_crc_a, check_crc_a, crc_a, trim_crc_a};
pub use command::Command;
