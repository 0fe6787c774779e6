// mfclassic/src/poller/halt.rs

use log::debug;
use rand::RngCore;

use super::MfClassicPoller;
use crate::crypto::Cipher;
use crate::error::TransportError;
use crate::protocol::Command;
use crate::transport::Transport;
use crate::types::AuthState;
use crate::{Error, Result};

impl<T: Transport, C: Cipher, R: RngCore> MfClassicPoller<T, C, R> {
    /// Send an enciphered HLTA and drop the session.
    ///
    /// A halted card does not answer, so only a timeout counts as success.
    /// On success the transport is forced back to idle.
    pub fn halt(&mut self) -> Result<()> {
        self.load_tx_with_crc(&Command::Halt.encode());
        match self.transceive_encrypted() {
            Err(TransportError::Timeout) => {
                self.auth_state = AuthState::Idle;
                self.transport.force_idle();
                Ok(())
            }
            other => {
                debug!("Halt answered: {:?}", other);
                Err(Error::Protocol)
            }
        }
    }
}
