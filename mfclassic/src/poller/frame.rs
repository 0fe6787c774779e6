// mfclassic/src/poller/frame.rs

use log::{debug, trace};
use rand::RngCore;

use super::MfClassicPoller;
use crate::constants::{ACK_NAK_BITS, CMD_ACK};
use crate::crypto::Cipher;
use crate::error::TransportResult;
use crate::protocol::{BitBuffer, Command, append_crc_a};
use crate::transport::Transport;
use crate::{Error, Result};

impl<T: Transport, C: Cipher, R: RngCore> MfClassicPoller<T, C, R> {
    /// Send a plain frame with CRC_A handled by the transport.
    pub fn send_standard_frame(
        &mut self,
        tx: &BitBuffer,
        rx: &mut BitBuffer,
        fwt_fc: u32,
    ) -> Result<()> {
        self.transport.send_standard_frame(tx, rx, fwt_fc)?;
        Ok(())
    }

    /// Send a raw frame: no CRC, computed odd parity.
    pub fn send_frame(&mut self, tx: &BitBuffer, rx: &mut BitBuffer, fwt_fc: u32) -> Result<()> {
        self.transport.txrx(tx, rx, fwt_fc)?;
        Ok(())
    }

    /// Send a frame with the parity bits it carries.
    pub fn send_custom_parity_frame(
        &mut self,
        tx: &BitBuffer,
        rx: &mut BitBuffer,
        fwt_fc: u32,
    ) -> Result<()> {
        self.transport.txrx_custom_parity(tx, rx, fwt_fc)?;
        Ok(())
    }

    /// Encipher `tx` under the session cipher, send it, and decipher the
    /// reply into `rx`. `tx` must already carry a CRC if the command needs
    /// one.
    pub fn send_encrypted_frame(
        &mut self,
        tx: &BitBuffer,
        rx: &mut BitBuffer,
        fwt_fc: u32,
    ) -> Result<()> {
        self.cipher.encrypt(None, tx, &mut self.tx_encrypted);
        self.transport
            .txrx_custom_parity(&self.tx_encrypted, &mut self.rx_encrypted, fwt_fc)?;
        self.cipher.decrypt(&self.rx_encrypted, rx);
        Ok(())
    }

    /// Encipher `tx_plain` and exchange it; the reply stays enciphered in
    /// `rx_encrypted`. The raw transport outcome is returned so callers can
    /// treat specific faults as success.
    pub(super) fn transceive_encrypted(&mut self) -> TransportResult {
        self.cipher
            .encrypt(None, &self.tx_plain, &mut self.tx_encrypted);
        trace!("tx {} (enc {})", self.tx_plain.to_hex(), self.tx_encrypted.to_hex());
        let result = self.transport.txrx_custom_parity(
            &self.tx_encrypted,
            &mut self.rx_encrypted,
            self.config.fwt_fc,
        );
        trace!("rx enc {} -> {:?}", self.rx_encrypted.to_hex(), result);
        result
    }

    /// Load `payload` plus CRC_A into `tx_plain`.
    pub(super) fn load_tx_with_crc(&mut self, payload: &[u8]) {
        self.tx_plain.copy_bytes(payload);
        append_crc_a(&mut self.tx_plain);
    }

    /// Send an enciphered two-byte command with CRC_A.
    pub(super) fn send_encrypted_command(&mut self, cmd: Command) -> Result<()> {
        self.load_tx_with_crc(&cmd.encode());
        self.transceive_encrypted()?;
        Ok(())
    }

    /// Require the reply in `rx_encrypted` to be an enciphered 4-bit ACK.
    pub(super) fn expect_ack(&mut self) -> Result<()> {
        if self.rx_encrypted.size_bits() != ACK_NAK_BITS {
            debug!(
                "Expected {}-bit ACK, got {} bits",
                ACK_NAK_BITS,
                self.rx_encrypted.size_bits()
            );
            return Err(Error::Protocol);
        }
        self.cipher.decrypt(&self.rx_encrypted, &mut self.rx_plain);
        if self.rx_plain.byte(0) != Some(CMD_ACK) {
            debug!("Not ACK received");
            return Err(Error::Protocol);
        }
        Ok(())
    }
}
