// mfclassic/src/lib.rs

//! mfclassic
//!
//! MIFARE Classic poller session layer: authentication, block and value
//! operations over an ISO14443-3A transport, with the stream cipher and the
//! reader nonce source injected.
#![warn(missing_docs)]

pub mod constants;
pub mod crypto;
pub mod error;
pub mod poller;
pub mod prelude;
pub mod protocol;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
