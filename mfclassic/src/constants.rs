// mfclassic/src/constants.rs
//! MIFARE Classic command codes and wire sizes

/// Authenticate with key A / key B
pub const CMD_AUTH_KEY_A: u8 = 0x60;
pub const CMD_AUTH_KEY_B: u8 = 0x61;

/// Undocumented authentication codes accepted by some non-compliant cards
pub const CMD_BACKDOOR_AUTH_KEY_A: u8 = 0x64;
pub const CMD_BACKDOOR_AUTH_KEY_B: u8 = 0x65;

pub const CMD_READ_BLOCK: u8 = 0x30;
pub const CMD_WRITE_BLOCK: u8 = 0xA0;

/// Value block arithmetic
pub const CMD_VALUE_DEC: u8 = 0xC0;
pub const CMD_VALUE_INC: u8 = 0xC1;
pub const CMD_VALUE_RESTORE: u8 = 0xC2;
pub const CMD_VALUE_TRANSFER: u8 = 0xB0;

/// HLTA: 0x50 0x00
pub const CMD_HALT_MSB: u8 = 0x50;
pub const CMD_HALT_LSB: u8 = 0x00;

/// 4-bit acknowledge / negative acknowledge nibbles
pub const CMD_ACK: u8 = 0x0A;
pub const CMD_NAK: u8 = 0x04;

/// Size of ACK/NAK replies in bits
pub const ACK_NAK_BITS: usize = 4;

pub const BLOCK_SIZE: usize = 16;
pub const KEY_SIZE: usize = 6;
pub const NONCE_SIZE: usize = 4;

/// Length of the CRC-A trailer in bytes
pub const CRC_SIZE: usize = 2;

/// Default frame waiting time in carrier cycles (fc)
pub const MF_CLASSIC_FWT_FC: u32 = 60000;

/// Number of blocks on a 1K card
pub const BLOCKS_1K: usize = 64;
