// mfclassic/src/protocol/command.rs

use crate::constants::*;
use crate::types::{KeyType, ValueCommand};

/// Two-byte MIFARE Classic commands issued by the poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Auth {
        key_type: KeyType,
        backdoor: bool,
        block: u8,
    },
    Read {
        block: u8,
    },
    Write {
        block: u8,
    },
    Value {
        cmd: ValueCommand,
        block: u8,
    },
    Transfer {
        block: u8,
    },
    Halt,
}

impl Command {
    /// Command code (first byte on the wire)
    pub fn code(&self) -> u8 {
        match *self {
            Command::Auth {
                key_type: KeyType::A,
                backdoor: false,
                ..
            } => CMD_AUTH_KEY_A,
            Command::Auth {
                key_type: KeyType::B,
                backdoor: false,
                ..
            } => CMD_AUTH_KEY_B,
            Command::Auth {
                key_type: KeyType::A,
                backdoor: true,
                ..
            } => CMD_BACKDOOR_AUTH_KEY_A,
            Command::Auth {
                key_type: KeyType::B,
                backdoor: true,
                ..
            } => CMD_BACKDOOR_AUTH_KEY_B,
            Command::Read { .. } => CMD_READ_BLOCK,
            Command::Write { .. } => CMD_WRITE_BLOCK,
            Command::Value { cmd, .. } => match cmd {
                ValueCommand::Increment => CMD_VALUE_INC,
                ValueCommand::Decrement => CMD_VALUE_DEC,
                ValueCommand::Restore => CMD_VALUE_RESTORE,
            },
            Command::Transfer { .. } => CMD_VALUE_TRANSFER,
            Command::Halt => CMD_HALT_MSB,
        }
    }

    /// Encode the command into its two plaintext bytes (CRC not included).
    pub fn encode(&self) -> [u8; 2] {
        let arg = match *self {
            Command::Auth { block, .. }
            | Command::Read { block }
            | Command::Write { block }
            | Command::Value { block, .. }
            | Command::Transfer { block } => block,
            Command::Halt => CMD_HALT_LSB,
        };
        [self.code(), arg]
    }
}
