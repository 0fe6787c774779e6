// mfclassic/src/poller/auth.rs

use log::{debug, trace};
use rand::RngCore;

use super::MfClassicPoller;
use crate::constants::{CMD_HALT_LSB, CMD_HALT_MSB, NONCE_SIZE};
use crate::crypto::Cipher;
use crate::transport::Transport;
use crate::types::{Ar, At, AuthContext, AuthState, Key, KeyType, Nr};
use crate::{Error, Result};

/// Mode bits shared by [`MfClassicPoller::auth`] and
/// [`MfClassicPoller::auth_nested`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthFlags {
    /// Use the undocumented backdoor AUTH command codes.
    pub backdoor: bool,
    /// Stop once the nonce is known, leaving the card waiting for `{Nr, Ar}`.
    pub early_ret: bool,
}

impl AuthFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn backdoor(mut self) -> Self {
        self.backdoor = true;
        self
    }

    pub fn early_ret(mut self) -> Self {
        self.early_ret = true;
        self
    }
}

impl<T: Transport, C: Cipher, R: RngCore> MfClassicPoller<T, C, R> {
    /// Authenticate to the sector holding `block_num`.
    ///
    /// When `data` is supplied it receives the captured challenge/response
    /// material. On any failure the session drops to `Idle`, a plain halt is
    /// sent and the original error is returned.
    pub fn auth(
        &mut self,
        block_num: u8,
        key: &Key,
        key_type: KeyType,
        data: Option<&mut AuthContext>,
        flags: AuthFlags,
    ) -> Result<()> {
        self.auth_common(block_num, key, key_type, data, false, flags)
    }

    /// Authenticate again inside an already authenticated session. The AUTH
    /// command and the nonce travel enciphered.
    pub fn auth_nested(
        &mut self,
        block_num: u8,
        key: &Key,
        key_type: KeyType,
        data: Option<&mut AuthContext>,
        flags: AuthFlags,
    ) -> Result<()> {
        self.auth_common(block_num, key, key_type, data, true, flags)
    }

    fn auth_common(
        &mut self,
        block_num: u8,
        key: &Key,
        key_type: KeyType,
        data: Option<&mut AuthContext>,
        is_nested: bool,
        flags: AuthFlags,
    ) -> Result<()> {
        let result = self.handshake(block_num, key, key_type, data, is_nested, flags);
        if let Err(e) = result {
            debug!(
                "Auth key {} block {} failed: {}, halting",
                key_type, block_num, e
            );
            self.auth_state = AuthState::Idle;
            self.halt_plain();
        }
        result
    }

    /// Plain HLTA after a failed handshake. The keystream is out of step by
    /// then, so the card would not decode an enciphered halt. The outcome is
    /// ignored and the transport is always forced idle.
    fn halt_plain(&mut self) {
        self.tx_plain.copy_bytes(&[CMD_HALT_MSB, CMD_HALT_LSB]);
        let result = self.transport.send_standard_frame(
            &self.tx_plain,
            &mut self.rx_plain,
            self.config.fwt_fc,
        );
        trace!("plain halt -> {:?}", result);
        self.transport.force_idle();
    }

    fn handshake(
        &mut self,
        block_num: u8,
        key: &Key,
        key_type: KeyType,
        mut data: Option<&mut AuthContext>,
        is_nested: bool,
        flags: AuthFlags,
    ) -> Result<()> {
        self.card = self.transport.card_data();

        let nt = self.get_nt_common(block_num, key_type, is_nested, flags.backdoor)?;
        if let Some(ctx) = data.as_deref_mut() {
            ctx.block_num = block_num;
            ctx.key_type = key_type;
            ctx.nt = nt;
        }
        if flags.early_ret {
            return Ok(());
        }

        let cuid = self.card.cuid();
        let mut nr = [0u8; NONCE_SIZE];
        self.rng.fill_bytes(&mut nr);
        let nr = Nr::from_bytes(nr);

        self.cipher.encrypt_reader_nonce(
            key.to_u64(),
            cuid,
            &nt,
            &nr,
            &mut self.tx_encrypted,
            is_nested,
        );
        self.transport.txrx_custom_parity(
            &self.tx_encrypted,
            &mut self.rx_encrypted,
            self.config.fwt_fc,
        )?;
        if self.rx_encrypted.size_bytes() != NONCE_SIZE {
            debug!("Tag answer of {} bits", self.rx_encrypted.size_bits());
            return Err(Error::Auth);
        }

        // Discard the keystream word that enciphered At.
        self.cipher.advance_word();
        self.auth_state = AuthState::Passed;

        if let Some(ctx) = data {
            let ar = self
                .tx_encrypted
                .data()
                .get(NONCE_SIZE..2 * NONCE_SIZE)
                .ok_or(Error::Protocol)?;
            ctx.nr = nr;
            ctx.ar = Ar::try_from(ar)?;
            ctx.at = At::try_from(self.rx_encrypted.data())?;
        }
        Ok(())
    }
}
