// mfclassic/src/poller/mod.rs

//! MIFARE Classic poller session.
//!
//! A [`MfClassicPoller`] owns the transport, the cipher state, the reader
//! nonce source and the scratch frames of one card session. Operations are
//! split by concern:
//!
//! - `frame`: plain, custom-parity and enciphered exchanges
//! - `nonce`: card nonce acquisition (direct and nested)
//! - `auth`: the challenge-response handshake
//! - `block`: 16-byte block read/write
//! - `value`: increment/decrement/restore/transfer
//! - `halt`: session teardown
//!
//! All calls block up to the configured frame waiting time and must be
//! serialized by the caller; nothing is retried internally.

use rand::RngCore;
use rand::rngs::OsRng;

use crate::constants::BLOCK_SIZE;
use crate::crypto::Cipher;
use crate::protocol::BitBuffer;
use crate::transport::Transport;
use crate::types::{AuthState, CardData};

mod auth;
mod block;
pub mod config;
mod frame;
mod halt;
mod nonce;
mod value;

pub use auth::AuthFlags;
pub use config::PollerConfig;

/// Scratch frames hold at most a block plus CRC.
const SCRATCH_CAPACITY: usize = BLOCK_SIZE + 2;

/// One MIFARE Classic session over a selected card.
///
/// `T` is the ISO14443-3A transport, `C` the stream cipher and `R` the source
/// of reader nonces.
pub struct MfClassicPoller<T, C, R = OsRng> {
    transport: T,
    cipher: C,
    rng: R,
    config: PollerConfig,
    card: CardData,
    auth_state: AuthState,
    tx_plain: BitBuffer,
    tx_encrypted: BitBuffer,
    rx_plain: BitBuffer,
    rx_encrypted: BitBuffer,
}

impl<T: Transport, C: Cipher> MfClassicPoller<T, C, OsRng> {
    /// Create a poller drawing reader nonces from the OS random source.
    pub fn new(transport: T, cipher: C) -> Self {
        Self::with_rng(transport, cipher, OsRng)
    }
}

impl<T: Transport, C: Cipher, R: RngCore> MfClassicPoller<T, C, R> {
    /// Create a poller with an explicit reader nonce source.
    pub fn with_rng(transport: T, cipher: C, rng: R) -> Self {
        let card = transport.card_data();
        Self {
            transport,
            cipher,
            rng,
            config: PollerConfig::default(),
            card,
            auth_state: AuthState::Idle,
            tx_plain: BitBuffer::with_capacity(SCRATCH_CAPACITY),
            tx_encrypted: BitBuffer::with_capacity(SCRATCH_CAPACITY),
            rx_plain: BitBuffer::with_capacity(SCRATCH_CAPACITY),
            rx_encrypted: BitBuffer::with_capacity(SCRATCH_CAPACITY),
        }
    }

    pub fn with_config(mut self, config: PollerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth_state
    }

    /// Card descriptor captured at the last authentication attempt.
    pub fn card_data(&self) -> &CardData {
        &self.card
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Tear the session apart, returning transport and cipher.
    pub fn into_parts(self) -> (T, C) {
        (self.transport, self.cipher)
    }
}
