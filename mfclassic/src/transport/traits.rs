// mfclassic/src/transport/traits.rs

use crate::error::TransportResult;
use crate::protocol::BitBuffer;
use crate::types::CardData;

/// ISO14443-3A poller the MIFARE Classic session runs on.
///
/// Anticollision, RF handling and timing live behind this trait. Every
/// exchange blocks until a reply arrives or `fwt_fc` carrier cycles elapse
/// (reported as `TransportError::Timeout`). The received frame is written to
/// `rx` even when the exchange reports a fault, so callers can inspect it.
pub trait Transport {
    /// Send `tx` with a CRC_A appended and odd parity. The reply's trailing
    /// CRC_A is verified and stripped; on a mismatch the raw reply is left in
    /// `rx` and `TransportError::WrongCrc` is returned.
    fn send_standard_frame(
        &mut self,
        tx: &BitBuffer,
        rx: &mut BitBuffer,
        fwt_fc: u32,
    ) -> TransportResult;

    /// Send `tx` as-is (odd parity, no CRC handling). May be shorter than a
    /// byte, e.g. for 7-bit commands.
    fn txrx(&mut self, tx: &BitBuffer, rx: &mut BitBuffer, fwt_fc: u32) -> TransportResult;

    /// Send `tx` with the parity bits it carries instead of computed odd
    /// parity; the reply is returned with its raw parity bits.
    fn txrx_custom_parity(
        &mut self,
        tx: &BitBuffer,
        rx: &mut BitBuffer,
        fwt_fc: u32,
    ) -> TransportResult;

    /// Descriptor of the currently selected card.
    fn card_data(&self) -> CardData;

    /// Drop the selection and return to the idle state, so the next exchange
    /// requires a fresh anticollision cycle.
    fn force_idle(&mut self);
}
