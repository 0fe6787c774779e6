// mfclassic/src/prelude.rs

pub use crate::crypto::{Cipher, MockCrypto};
pub use crate::poller::{AuthFlags, MfClassicPoller, PollerConfig};
pub use crate::protocol::{BitBuffer, Command};
pub use crate::transport::traits::Transport;
pub use crate::{
    Ar, At, AuthContext, AuthState, Block, CardData, Error, Key, KeyType, Nr, Nt, Result,
    TransportError, TransportResult, Uid, ValueCommand,
};

// Re-export small utilities for convenience
pub use crate::utils::{duration_to_fc, fc_to_duration};
