// mfclassic/src/poller/nonce.rs

use log::debug;
use rand::RngCore;

use super::MfClassicPoller;
use crate::constants::NONCE_SIZE;
use crate::crypto::Cipher;
use crate::error::TransportError;
use crate::protocol::Command;
use crate::transport::Transport;
use crate::types::{KeyType, Nt};
use crate::{Error, Result};

impl<T: Transport, C: Cipher, R: RngCore> MfClassicPoller<T, C, R> {
    /// Request the card nonce for `block_num` with a plain AUTH command.
    ///
    /// The card leaves the handshake open afterwards, waiting for `{Nr, Ar}`.
    pub fn get_nt(&mut self, block_num: u8, key_type: KeyType, backdoor: bool) -> Result<Nt> {
        self.get_nt_common(block_num, key_type, false, backdoor)
    }

    /// Request the card nonce with an AUTH command enciphered under the
    /// current session. The returned nonce is still enciphered.
    pub fn get_nt_nested(
        &mut self,
        block_num: u8,
        key_type: KeyType,
        backdoor: bool,
    ) -> Result<Nt> {
        self.get_nt_common(block_num, key_type, true, backdoor)
    }

    pub(super) fn get_nt_common(
        &mut self,
        block_num: u8,
        key_type: KeyType,
        is_nested: bool,
        backdoor: bool,
    ) -> Result<Nt> {
        let cmd = Command::Auth {
            key_type,
            backdoor,
            block: block_num,
        };

        if is_nested {
            self.load_tx_with_crc(&cmd.encode());
            self.cipher
                .encrypt(None, &self.tx_plain, &mut self.tx_encrypted);
            // Left enciphered: only the next epoch's keystream can read it.
            self.transport.txrx_custom_parity(
                &self.tx_encrypted,
                &mut self.rx_plain,
                self.config.fwt_fc,
            )?;
        } else {
            self.tx_plain.copy_bytes(&cmd.encode());
            match self.transport.send_standard_frame(
                &self.tx_plain,
                &mut self.rx_plain,
                self.config.fwt_fc,
            ) {
                // Nt carries no CRC, so a clean reception fails the CRC check.
                Err(TransportError::WrongCrc) => {}
                Ok(()) => {
                    debug!("Nonce reply passed CRC check");
                    return Err(Error::Protocol);
                }
                Err(e) => return Err(e.into()),
            }
        }

        if self.rx_plain.size_bytes() != NONCE_SIZE || self.rx_plain.size_bits() % 8 != 0 {
            debug!("Nonce of {} bits", self.rx_plain.size_bits());
            return Err(Error::Protocol);
        }
        Nt::try_from(self.rx_plain.data())
    }
}
