//! Test support helpers intended for use by unit and integration tests.
//!
//! [`scripted_poller`] pairs a poller with a [`MockTransport`] and an identity
//! cipher, so wire fixtures can be written as plain bytes. [`SimulatedCard`]
//! plays a 1K MIFARE Classic card behind the [`Transport`] trait, running the
//! card side of [`MockCrypto`] in lock-step with the poller.
#![allow(dead_code)]

use log::trace;
use rand::rngs::mock::StepRng;

use crate::constants::*;
use crate::crypto::{Cipher, MockCrypto};
use crate::error::{TransportError, TransportResult};
use crate::poller::MfClassicPoller;
use crate::protocol::{BitBuffer, append_crc_a, check_crc_a};
use crate::transport::Transport;
use crate::transport::mock::{FrameKind, MockResponse, MockTransport};
use crate::types::{Block, CardData, Key, Uid, ValueCommand, sector_of};

/// Poller type returned by [`scripted_poller`].
pub type ScriptedPoller = MfClassicPoller<MockTransport, MockCrypto, StepRng>;

/// Poller type returned by [`simulated_poller`].
pub type SimulatedPoller = MfClassicPoller<SimulatedCard, MockCrypto, StepRng>;

/// Reader nonce source used by the helpers: deterministic, never all zero.
#[doc(hidden)]
pub fn test_rng() -> StepRng {
    StepRng::new(0x0BAD_F00D_1234_5678, 0x0101_0101_0101_0101)
}

/// 4-byte UID card: UID 01 02 03 04, ATQA 04 00, SAK 08.
#[doc(hidden)]
pub fn sample_card_data() -> CardData {
    let uid = Uid::try_from(&[0x01, 0x02, 0x03, 0x04][..]).unwrap_or_default();
    CardData::new(uid, [0x04, 0x00], 0x08)
}

/// Poller over a MockTransport pre-seeded with `responses`, using an
/// identity cipher.
#[doc(hidden)]
pub fn scripted_poller(responses: Vec<MockResponse>) -> ScriptedPoller {
    let mut transport = MockTransport::new(sample_card_data());
    for resp in responses {
        transport.push_response(resp);
    }
    MfClassicPoller::with_rng(transport, MockCrypto::identity(), test_rng())
}

/// Poller talking to `card` through the keyed mock cipher.
#[doc(hidden)]
pub fn simulated_poller(card: SimulatedCard) -> SimulatedPoller {
    MfClassicPoller::with_rng(card, MockCrypto::new(), test_rng())
}

/// How a simulated card reacts to a reader answer computed with a wrong key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WrongKeyReaction {
    /// Stay silent (the poller sees a timeout)
    #[default]
    Mute,
    /// Answer with a plain 4-bit NAK
    Nak,
}

/// Where the simulated card is in its command state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Idle,
    AwaitingReaderAnswer { nt: u32, key: Key, sector: u8 },
    Authenticated { sector: u8 },
    AwaitingWriteData { sector: u8, block: u8 },
    AwaitingValueOperand { sector: u8, block: u8, cmd: ValueCommand },
    Halted,
}

/// In-memory MIFARE Classic 1K card.
///
/// Sector trailers hold key A as zeros (the card never reveals it), default
/// access bits and key B. Every frame received is kept in `frames`.
#[derive(Debug, Clone)]
pub struct SimulatedCard {
    blocks: Vec<Block>,
    keys: Vec<(Key, Key)>,
    backdoor_key: Option<Key>,
    card_data: CardData,
    cipher: MockCrypto,
    nonce_state: u32,
    state: CardState,
    transfer: Option<(i32, u8)>,
    wrong_key: WrongKeyReaction,
    gen1a: bool,
    gen1a_unlocked: bool,
    pub frames: Vec<(FrameKind, BitBuffer)>,
    pub force_idle_calls: usize,
}

const SECTORS_1K: usize = BLOCKS_1K / 4;
const ACCESS_BITS: [u8; 4] = [0xFF, 0x07, 0x80, 0x69];

fn trailer(key_b: &Key) -> Block {
    let mut b = [0u8; BLOCK_SIZE];
    b[6..10].copy_from_slice(&ACCESS_BITS);
    b[10..].copy_from_slice(key_b.as_bytes());
    Block::from_bytes(b)
}

fn is_trailer(block: u8) -> bool {
    block % 4 == 3
}

impl Default for SimulatedCard {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedCard {
    /// Blank card, all keys `FFFFFFFFFFFF`.
    pub fn new() -> Self {
        let keys = vec![(Key::DEFAULT, Key::DEFAULT); SECTORS_1K];
        let blocks = (0..BLOCKS_1K as u8)
            .map(|b| {
                if is_trailer(b) {
                    trailer(&Key::DEFAULT)
                } else {
                    Block::default()
                }
            })
            .collect();
        Self {
            blocks,
            keys,
            backdoor_key: None,
            card_data: sample_card_data(),
            cipher: MockCrypto::new(),
            nonce_state: 0x4A7C_15E1,
            state: CardState::Idle,
            transfer: None,
            wrong_key: WrongKeyReaction::default(),
            gen1a: false,
            gen1a_unlocked: false,
            frames: Vec::new(),
            force_idle_calls: 0,
        }
    }

    pub fn with_card_data(mut self, card_data: CardData) -> Self {
        self.card_data = card_data;
        self
    }

    pub fn with_block(mut self, block: u8, data: Block) -> Self {
        if let Some(slot) = self.blocks.get_mut(usize::from(block)) {
            *slot = data;
        }
        self
    }

    pub fn with_value_block(self, block: u8, value: i32) -> Self {
        self.with_block(block, Block::from_value(value, block))
    }

    pub fn with_sector_keys(mut self, sector: u8, key_a: Key, key_b: Key) -> Self {
        if let Some(slot) = self.keys.get_mut(usize::from(sector)) {
            *slot = (key_a, key_b);
            let block = usize::from(sector) * 4 + 3;
            self.blocks[block] = trailer(&key_b);
        }
        self
    }

    /// Accept the backdoor AUTH codes with `key`.
    pub fn with_backdoor(mut self, key: Key) -> Self {
        self.backdoor_key = Some(key);
        self
    }

    pub fn with_wrong_key_reaction(mut self, reaction: WrongKeyReaction) -> Self {
        self.wrong_key = reaction;
        self
    }

    /// Answer the magic-card unlock sequence (7-bit 0x40, then 0x43).
    pub fn with_gen1a(mut self) -> Self {
        self.gen1a = true;
        self
    }

    pub fn with_nonce_seed(mut self, seed: u32) -> Self {
        self.nonce_state = seed;
        self
    }

    pub fn block(&self, block: u8) -> Option<&Block> {
        self.blocks.get(usize::from(block))
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state == CardState::Halted
    }

    /// Wake the card up again after a halt or a broken session.
    pub fn select(&mut self) {
        self.state = CardState::Idle;
        self.transfer = None;
        self.gen1a_unlocked = false;
    }

    fn next_nonce(&mut self) -> u32 {
        self.nonce_state = self
            .nonce_state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        self.nonce_state
    }

    fn key_for(&self, code: u8, block: u8) -> Option<Key> {
        if usize::from(block) >= BLOCKS_1K {
            return None;
        }
        let (key_a, key_b) = self.keys[usize::from(sector_of(block))];
        match code {
            CMD_AUTH_KEY_A => Some(key_a),
            CMD_AUTH_KEY_B => Some(key_b),
            CMD_BACKDOOR_AUTH_KEY_A | CMD_BACKDOOR_AUTH_KEY_B => self.backdoor_key,
            _ => None,
        }
    }

    fn silent(&mut self, rx: &mut BitBuffer) -> TransportResult {
        rx.reset();
        Err(TransportError::Timeout)
    }

    /// Drop the session and stay silent. A halted card stays halted.
    fn abort(&mut self, rx: &mut BitBuffer) -> TransportResult {
        if self.state != CardState::Halted {
            self.state = CardState::Idle;
        }
        self.silent(rx)
    }

    fn reply_encrypted(&mut self, plain: &BitBuffer, rx: &mut BitBuffer) -> TransportResult {
        self.cipher.encrypt(None, plain, rx);
        Ok(())
    }

    fn ack(&mut self, rx: &mut BitBuffer) -> TransportResult {
        self.reply_encrypted(&BitBuffer::from_bits(&[CMD_ACK], ACK_NAK_BITS), rx)
    }

    /// A NAK ends the session.
    fn nak(&mut self, rx: &mut BitBuffer) -> TransportResult {
        self.state = CardState::Idle;
        self.reply_encrypted(&BitBuffer::from_bits(&[CMD_NAK], ACK_NAK_BITS), rx)
    }

    fn begin_auth(
        &mut self,
        code: u8,
        block: u8,
        nested: bool,
        rx: &mut BitBuffer,
    ) -> TransportResult {
        let Some(key) = self.key_for(code, block) else {
            return self.abort(rx);
        };
        let nt = self.next_nonce();
        self.state = CardState::AwaitingReaderAnswer {
            nt,
            key,
            sector: sector_of(block),
        };
        trace!("sim: auth block {} nt {:08X} nested {}", block, nt, nested);
        if nested {
            let masked = nt ^ MockCrypto::nested_mask(key.to_u64(), self.card_data.cuid());
            rx.copy_bytes(&masked.to_be_bytes());
            Ok(())
        } else {
            // The transport checks a CRC the nonce does not carry.
            rx.copy_bytes(&nt.to_be_bytes());
            Err(TransportError::WrongCrc)
        }
    }

    fn finish_auth(
        &mut self,
        nt: u32,
        key: Key,
        sector: u8,
        tx: &BitBuffer,
        rx: &mut BitBuffer,
    ) -> TransportResult {
        if tx.size_bytes() != 8 {
            return self.abort(rx);
        }
        self.cipher = MockCrypto::new();
        self.cipher.init(key.to_u64(), self.card_data.cuid(), nt);
        let mut plain = BitBuffer::new();
        self.cipher.decrypt(tx, &mut plain);

        let expected = MockCrypto::reader_answer(nt).to_be_bytes();
        if plain.data().get(4..8) != Some(&expected[..]) {
            self.state = CardState::Idle;
            return match self.wrong_key {
                WrongKeyReaction::Mute => self.silent(rx),
                WrongKeyReaction::Nak => {
                    rx.copy_bits(&[CMD_NAK], ACK_NAK_BITS);
                    Ok(())
                }
            };
        }
        self.state = CardState::Authenticated { sector };
        let at = BitBuffer::from_bytes(&MockCrypto::tag_answer(nt).to_be_bytes());
        self.reply_encrypted(&at, rx)
    }

    fn command(&mut self, sector: u8, tx: &BitBuffer, rx: &mut BitBuffer) -> TransportResult {
        let mut plain = BitBuffer::new();
        self.cipher.decrypt(tx, &mut plain);
        if plain.size_bytes() != 4 || !check_crc_a(&plain) {
            return self.abort(rx);
        }
        let (code, block) = (plain.data()[0], plain.data()[1]);
        let in_sector = usize::from(block) < BLOCKS_1K && sector_of(block) == sector;

        match code {
            CMD_AUTH_KEY_A | CMD_AUTH_KEY_B | CMD_BACKDOOR_AUTH_KEY_A | CMD_BACKDOOR_AUTH_KEY_B => {
                self.begin_auth(code, block, true, rx)
            }
            CMD_HALT_MSB if block == CMD_HALT_LSB => {
                self.state = CardState::Halted;
                self.silent(rx)
            }
            _ if !in_sector => self.nak(rx),
            CMD_READ_BLOCK => {
                let mut reply = BitBuffer::from_bytes(self.blocks[usize::from(block)].as_bytes());
                append_crc_a(&mut reply);
                self.reply_encrypted(&reply, rx)
            }
            CMD_WRITE_BLOCK => {
                self.state = CardState::AwaitingWriteData { sector, block };
                self.ack(rx)
            }
            CMD_VALUE_DEC | CMD_VALUE_INC | CMD_VALUE_RESTORE => {
                if !self.blocks[usize::from(block)].is_value_block() {
                    return self.nak(rx);
                }
                let cmd = match code {
                    CMD_VALUE_DEC => ValueCommand::Decrement,
                    CMD_VALUE_INC => ValueCommand::Increment,
                    _ => ValueCommand::Restore,
                };
                self.state = CardState::AwaitingValueOperand { sector, block, cmd };
                self.ack(rx)
            }
            CMD_VALUE_TRANSFER => match self.transfer.take() {
                Some((value, addr)) if !is_trailer(block) => {
                    self.blocks[usize::from(block)] = Block::from_value(value, addr);
                    self.ack(rx)
                }
                _ => self.nak(rx),
            },
            _ => self.nak(rx),
        }
    }

    fn write_data(
        &mut self,
        sector: u8,
        block: u8,
        tx: &BitBuffer,
        rx: &mut BitBuffer,
    ) -> TransportResult {
        let mut plain = BitBuffer::new();
        self.cipher.decrypt(tx, &mut plain);
        if plain.size_bytes() != BLOCK_SIZE + CRC_SIZE || !check_crc_a(&plain) {
            return self.nak(rx);
        }
        if let Ok(data) = Block::try_from(&plain.data()[..BLOCK_SIZE]) {
            self.blocks[usize::from(block)] = data;
        }
        self.state = CardState::Authenticated { sector };
        self.ack(rx)
    }

    fn value_operand(
        &mut self,
        sector: u8,
        block: u8,
        cmd: ValueCommand,
        tx: &BitBuffer,
        rx: &mut BitBuffer,
    ) -> TransportResult {
        let mut plain = BitBuffer::new();
        self.cipher.decrypt(tx, &mut plain);
        if plain.size_bytes() != 4 + CRC_SIZE || !check_crc_a(&plain) {
            return self.nak(rx);
        }
        let d = plain.data();
        let delta = i32::from_le_bytes([d[0], d[1], d[2], d[3]]);
        if let Some((value, addr)) = self.blocks[usize::from(block)].value() {
            let result = match cmd {
                ValueCommand::Increment => value.wrapping_add(delta),
                ValueCommand::Decrement => value.wrapping_sub(delta),
                ValueCommand::Restore => value,
            };
            self.transfer = Some((result, addr));
        }
        self.state = CardState::Authenticated { sector };
        // Accepted operands are not answered.
        self.silent(rx)
    }
}

impl Transport for SimulatedCard {
    fn send_standard_frame(
        &mut self,
        tx: &BitBuffer,
        rx: &mut BitBuffer,
        _fwt_fc: u32,
    ) -> TransportResult {
        self.frames.push((FrameKind::Standard, tx.clone()));
        let (code, block) = match tx.data() {
            [code, block] => (*code, *block),
            _ => return self.abort(rx),
        };
        match self.state {
            CardState::Halted => self.silent(rx),
            // Plain HLTA is honoured in any session state.
            _ if code == CMD_HALT_MSB && block == CMD_HALT_LSB => {
                self.state = CardState::Halted;
                self.silent(rx)
            }
            CardState::Idle if self.gen1a_unlocked && code == CMD_READ_BLOCK => {
                match self.blocks.get(usize::from(block)).copied() {
                    Some(data) => {
                        rx.copy_bytes(data.as_bytes());
                        Ok(())
                    }
                    None => self.abort(rx),
                }
            }
            CardState::Idle => self.begin_auth(code, block, false, rx),
            _ => self.abort(rx),
        }
    }

    fn txrx(&mut self, tx: &BitBuffer, rx: &mut BitBuffer, _fwt_fc: u32) -> TransportResult {
        self.frames.push((FrameKind::Plain, tx.clone()));
        if !self.gen1a || self.state != CardState::Idle {
            return self.abort(rx);
        }
        match (tx.size_bits(), tx.byte(0)) {
            (7, Some(0x40)) => {
                self.gen1a_unlocked = true;
                rx.copy_bits(&[CMD_ACK], ACK_NAK_BITS);
                Ok(())
            }
            (8, Some(0x43)) if self.gen1a_unlocked => {
                rx.copy_bits(&[CMD_ACK], ACK_NAK_BITS);
                Ok(())
            }
            _ => self.abort(rx),
        }
    }

    fn txrx_custom_parity(
        &mut self,
        tx: &BitBuffer,
        rx: &mut BitBuffer,
        _fwt_fc: u32,
    ) -> TransportResult {
        self.frames.push((FrameKind::CustomParity, tx.clone()));
        match self.state {
            CardState::AwaitingReaderAnswer { nt, key, sector } => {
                self.finish_auth(nt, key, sector, tx, rx)
            }
            CardState::Authenticated { sector } => self.command(sector, tx, rx),
            CardState::AwaitingWriteData { sector, block } => {
                self.write_data(sector, block, tx, rx)
            }
            CardState::AwaitingValueOperand { sector, block, cmd } => {
                self.value_operand(sector, block, cmd, tx, rx)
            }
            CardState::Idle | CardState::Halted => self.silent(rx),
        }
    }

    fn card_data(&self) -> CardData {
        self.card_data
    }

    fn force_idle(&mut self) {
        self.force_idle_calls += 1;
    }
}
