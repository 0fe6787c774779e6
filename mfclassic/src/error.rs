// mfclassic/src/error.rs

use thiserror::Error;

/// Faults reported by the ISO14443-3A transport. A clean exchange is `Ok(())`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportError {
    #[error("card not present")]
    NotPresent,

    #[error("collision resolution failed")]
    ColResFailed,

    #[error("communication error")]
    Communication,

    #[error("wrong crc")]
    WrongCrc,

    #[error("frame waiting time expired")]
    Timeout,
}

/// Transport-level result: the received frame lands in the caller's buffer.
pub type TransportResult = std::result::Result<(), TransportError>;

/// Errors returned by MIFARE Classic poller operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    #[error("card not present")]
    NotPresent,

    /// Malformed, garbled or size-mismatched response, or a missing ACK.
    /// Session state is indeterminate afterwards.
    #[error("protocol error")]
    Protocol,

    #[error("operation timed out")]
    Timeout,

    /// The card engaged in the handshake but rejected the key.
    #[error("authentication failed")]
    Auth,

    /// Only produced by slice-to-newtype conversions, never by a wire exchange.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// UID of a length other than 4, 7 or 10 bytes.
    #[error("invalid UID length {0}: expected 4, 7 or 10")]
    InvalidUidLength(usize),
}

impl From<TransportError> for Error {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::NotPresent => Error::NotPresent,
            TransportError::Timeout => Error::Timeout,
            TransportError::ColResFailed
            | TransportError::Communication
            | TransportError::WrongCrc => Error::Protocol,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
