// mfclassic/src/transport/mock.rs

use crate::error::{TransportError, TransportResult};
use crate::protocol::BitBuffer;
use crate::transport::traits::Transport;
use crate::types::CardData;

/// Which transport primitive carried a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Standard,
    Plain,
    CustomParity,
}

/// A scripted reply: the frame written to `rx` plus the exchange outcome.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub frame: BitBuffer,
    pub result: TransportResult,
}

impl MockResponse {
    pub fn bytes(bytes: &[u8]) -> Self {
        Self {
            frame: BitBuffer::from_bytes(bytes),
            result: Ok(()),
        }
    }

    pub fn bits(bytes: &[u8], size_bits: usize) -> Self {
        Self {
            frame: BitBuffer::from_bits(bytes, size_bits),
            result: Ok(()),
        }
    }

    /// A reply that was received but reported with `error`, e.g. a nonce
    /// that fails the CRC check.
    pub fn bytes_with_error(bytes: &[u8], error: TransportError) -> Self {
        Self {
            frame: BitBuffer::from_bytes(bytes),
            result: Err(error),
        }
    }

    pub fn error(error: TransportError) -> Self {
        Self {
            frame: BitBuffer::new(),
            result: Err(error),
        }
    }
}

/// Mock transport for unit tests. It records sent frames and returns queued
/// responses in order; an empty queue answers with `Timeout`.
#[derive(Debug, Default)]
pub struct MockTransport {
    pub sent: Vec<(FrameKind, BitBuffer)>,
    pub responses: Vec<MockResponse>,
    pub card_data: CardData,
    /// Number of `force_idle` calls observed
    pub force_idle_calls: usize,
    pub selected: bool,
}

impl MockTransport {
    pub fn new(card_data: CardData) -> Self {
        Self {
            sent: Vec::new(),
            responses: Vec::new(),
            card_data,
            force_idle_calls: 0,
            selected: true,
        }
    }

    pub fn push_response(&mut self, resp: MockResponse) {
        self.responses.push(resp);
    }

    pub fn pop_sent(&mut self) -> Option<(FrameKind, BitBuffer)> {
        self.sent.pop()
    }

    pub fn sent_kinds(&self) -> Vec<FrameKind> {
        self.sent.iter().map(|(k, _)| *k).collect()
    }

    fn exchange(&mut self, kind: FrameKind, tx: &BitBuffer, rx: &mut BitBuffer) -> TransportResult {
        self.sent.push((kind, tx.clone()));
        if self.responses.is_empty() {
            rx.reset();
            return Err(TransportError::Timeout);
        }
        let resp = self.responses.remove(0);
        rx.copy_from(&resp.frame);
        resp.result
    }
}

impl Transport for MockTransport {
    fn send_standard_frame(
        &mut self,
        tx: &BitBuffer,
        rx: &mut BitBuffer,
        _fwt_fc: u32,
    ) -> TransportResult {
        self.exchange(FrameKind::Standard, tx, rx)
    }

    fn txrx(&mut self, tx: &BitBuffer, rx: &mut BitBuffer, _fwt_fc: u32) -> TransportResult {
        self.exchange(FrameKind::Plain, tx, rx)
    }

    fn txrx_custom_parity(
        &mut self,
        tx: &BitBuffer,
        rx: &mut BitBuffer,
        _fwt_fc: u32,
    ) -> TransportResult {
        self.exchange(FrameKind::CustomParity, tx, rx)
    }

    fn card_data(&self) -> CardData {
        self.card_data
    }

    fn force_idle(&mut self) {
        self.force_idle_calls += 1;
        self.selected = false;
    }
}
