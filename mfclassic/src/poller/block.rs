// mfclassic/src/poller/block.rs

use log::debug;
use rand::RngCore;

use super::MfClassicPoller;
use crate::constants::{BLOCK_SIZE, CRC_SIZE};
use crate::crypto::Cipher;
use crate::protocol::{Command, check_crc_a, trim_crc_a};
use crate::transport::Transport;
use crate::types::Block;
use crate::{Error, Result};

impl<T: Transport, C: Cipher, R: RngCore> MfClassicPoller<T, C, R> {
    /// Read one 16-byte block inside an authenticated session.
    pub fn read_block(&mut self, block_num: u8) -> Result<Block> {
        self.send_encrypted_command(Command::Read { block: block_num })?;

        if self.rx_encrypted.size_bytes() != BLOCK_SIZE + CRC_SIZE {
            debug!(
                "Read block {}: {} bits received",
                block_num,
                self.rx_encrypted.size_bits()
            );
            return Err(Error::Protocol);
        }
        self.cipher.decrypt(&self.rx_encrypted, &mut self.rx_plain);
        if !check_crc_a(&self.rx_plain) {
            debug!("CRC error");
            return Err(Error::Protocol);
        }
        trim_crc_a(&mut self.rx_plain);
        Block::try_from(self.rx_plain.data())
    }

    /// Write one 16-byte block inside an authenticated session.
    ///
    /// The command and the data are each acknowledged; a failed first phase
    /// never sends the data.
    pub fn write_block(&mut self, block_num: u8, data: &Block) -> Result<()> {
        self.send_encrypted_command(Command::Write { block: block_num })?;
        self.expect_ack()?;

        self.load_tx_with_crc(data.as_bytes());
        self.transceive_encrypted()?;
        self.expect_ack()
    }
}
