// mfclassic/src/poller/value.rs

use log::debug;
use rand::RngCore;

use super::MfClassicPoller;
use crate::crypto::Cipher;
use crate::error::TransportError;
use crate::protocol::Command;
use crate::transport::Transport;
use crate::types::ValueCommand;
use crate::{Error, Result};

impl<T: Transport, C: Cipher, R: RngCore> MfClassicPoller<T, C, R> {
    /// Apply `cmd` with `delta` to the value block `block_num`.
    ///
    /// The result lands in the card's transfer buffer; nothing is committed
    /// until [`value_transfer`](Self::value_transfer).
    pub fn value_cmd(&mut self, block_num: u8, cmd: ValueCommand, delta: i32) -> Result<()> {
        self.send_encrypted_command(Command::Value {
            cmd,
            block: block_num,
        })?;
        self.expect_ack()?;

        self.load_tx_with_crc(&delta.to_le_bytes());
        match self.transceive_encrypted() {
            // The card stays silent when the operand is accepted.
            Err(TransportError::Timeout) => Ok(()),
            other => {
                debug!("Value operand for block {}: {:?}", block_num, other);
                Err(Error::Protocol)
            }
        }
    }

    /// Commit the transfer buffer to `block_num`.
    pub fn value_transfer(&mut self, block_num: u8) -> Result<()> {
        self.send_encrypted_command(Command::Transfer { block: block_num })?;
        self.expect_ack()
    }
}
