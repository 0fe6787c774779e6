// mfclassic/src/crypto/mock.rs

use crate::crypto::Cipher;
use crate::protocol::{BitBuffer, odd_parity};
use crate::types::{Nr, Nt};

/// Deterministic stand-in for the card cipher, for tests and simulation.
///
/// It is NOT the MIFARE Classic cipher. It keeps the properties the poller
/// relies on: a keystream seeded from key, CUID and nonce; parity bits
/// scrambled together with data; a nested nonce that is only legible once the
/// matching key is known. Two instances initialized alike produce the same
/// keystream, so one can play the reader and the other the card.
///
/// `MockCrypto::identity()` yields an all-zero keystream, which lets unit
/// tests script wire fixtures as plain bytes.
#[derive(Debug, Clone, Default)]
pub struct MockCrypto {
    state: u64,
    identity: bool,
}

fn splitmix64(z: u64) -> u64 {
    let mut z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl MockCrypto {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity() -> Self {
        Self {
            state: 0,
            identity: true,
        }
    }

    /// Start a keystream epoch. Card side of `encrypt_reader_nonce`.
    pub fn init(&mut self, key: u64, cuid: u32, nt: u32) {
        self.state = splitmix64(key ^ (u64::from(cuid ^ nt) << 16));
    }

    /// Mask a card applies to the nonce of a nested authentication.
    pub fn nested_mask(key: u64, cuid: u32) -> u32 {
        (splitmix64(key.rotate_left(17) ^ u64::from(cuid)) >> 32) as u32
    }

    /// Plaintext reader answer expected for `nt`.
    pub fn reader_answer(nt: u32) -> u32 {
        nt.rotate_left(7) ^ 0xA5A5_A5A5
    }

    /// Plaintext tag answer for `nt`.
    pub fn tag_answer(nt: u32) -> u32 {
        nt.rotate_right(11) ^ 0x5A5A_5A5A
    }

    fn next_keystream_byte(&mut self) -> u8 {
        if self.identity {
            return 0;
        }
        self.state = splitmix64(self.state);
        (self.state >> 56) as u8
    }

    fn apply(&mut self, feedback: Option<&[u8]>, input: &BitBuffer, out: &mut BitBuffer) {
        let bits = input.size_bits();
        let mut data = Vec::with_capacity(input.size_bytes());
        let mut parity = Vec::with_capacity(input.size_bytes());
        for (i, &byte) in input.data().iter().enumerate() {
            let mut ks = self.next_keystream_byte();
            let remaining = bits - i * 8;
            if remaining < 8 {
                ks &= (1u8 << remaining) - 1;
            }
            data.push(byte ^ ks);
            let p = input.parity().get(i).copied().unwrap_or(odd_parity(byte));
            parity.push(p ^ (ks & 0x01 == 0x01));
            if let Some(&fb) = feedback.and_then(|f| f.get(i)) {
                if !self.identity {
                    self.state ^= u64::from(fb);
                }
            }
        }
        out.load(&data, &parity, bits);
    }
}

impl Cipher for MockCrypto {
    fn encrypt(&mut self, keystream: Option<&[u8]>, plain: &BitBuffer, out: &mut BitBuffer) {
        self.apply(keystream, plain, out);
    }

    fn decrypt(&mut self, encrypted: &BitBuffer, out: &mut BitBuffer) {
        self.apply(None, encrypted, out);
    }

    fn encrypt_reader_nonce(
        &mut self,
        key: u64,
        cuid: u32,
        nt: &Nt,
        nr: &Nr,
        out: &mut BitBuffer,
        is_nested: bool,
    ) {
        let mut nt = nt.to_u32();
        if is_nested && !self.identity {
            nt ^= Self::nested_mask(key, cuid);
        }
        self.init(key, cuid, nt);

        let mut frame = [0u8; 8];
        frame[..4].copy_from_slice(nr.as_bytes());
        frame[4..].copy_from_slice(&Self::reader_answer(nt).to_be_bytes());
        self.apply(None, &BitBuffer::from_bytes(&frame), out);
    }

    fn advance_word(&mut self) -> u32 {
        let ks = [
            self.next_keystream_byte(),
            self.next_keystream_byte(),
            self.next_keystream_byte(),
            self.next_keystream_byte(),
        ];
        u32::from_be_bytes(ks)
    }
}
