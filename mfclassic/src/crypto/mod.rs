//! Stream cipher capability
//!
//! The poller never implements the MIFARE Classic cipher itself. It drives an
//! injected [`Cipher`] whose keystream advances in lock-step with every frame
//! exchanged, so a session can run against real hardware glue or a mock.

pub mod mock;

use crate::protocol::BitBuffer;
use crate::types::{Nr, Nt};

pub use mock::MockCrypto;

/// Keystream state shared by one poller session.
///
/// Every call consumes keystream. Callers must invoke these methods in the
/// exact order the corresponding frames travel over the air.
pub trait Cipher {
    /// Encipher `plain` (data and parity bits) into `out`.
    ///
    /// `keystream` optionally supplies bytes fed back into the cipher state
    /// while encrypting.
    fn encrypt(&mut self, keystream: Option<&[u8]>, plain: &BitBuffer, out: &mut BitBuffer);

    /// Decipher `encrypted` into `out`.
    fn decrypt(&mut self, encrypted: &BitBuffer, out: &mut BitBuffer);

    /// Start a new keystream epoch from `key`, `cuid` and `nt`, then encipher
    /// the 8-byte `{Nr, Ar}` reader answer into `out`.
    ///
    /// With `is_nested` the nonce is still enciphered under the new epoch and
    /// is deciphered while the state is loaded.
    fn encrypt_reader_nonce(
        &mut self,
        key: u64,
        cuid: u32,
        nt: &Nt,
        nr: &Nr,
        out: &mut BitBuffer,
        is_nested: bool,
    );

    /// Consume and return one 32-bit keystream word.
    fn advance_word(&mut self) -> u32;
}
