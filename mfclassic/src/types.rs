// mfclassic/src/types.rs

use crate::Error;
use crate::constants::{BLOCK_SIZE, KEY_SIZE, NONCE_SIZE};
use derive_more::{Display, From};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! nonce_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, From)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name([u8; NONCE_SIZE]);

        impl $name {
            pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
                &self.0
            }

            /// Big-endian (wire order) numeric value
            pub fn to_u32(&self) -> u32 {
                u32::from_be_bytes(self.0)
            }

            pub fn from_u32(value: u32) -> Self {
                Self(value.to_be_bytes())
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = Error;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                let arr: [u8; NONCE_SIZE] =
                    bytes.try_into().map_err(|_| Error::InvalidLength {
                        expected: NONCE_SIZE,
                        actual: bytes.len(),
                    })?;
                Ok(Self(arr))
            }
        }
    };
}

nonce_newtype!(
    /// Card-issued challenge (Nt)
    Nt
);
nonce_newtype!(
    /// Reader-chosen nonce (Nr)
    Nr
);
nonce_newtype!(
    /// Reader answer (Ar) as sent on the wire
    Ar
);
nonce_newtype!(
    /// Tag answer (At) as received on the wire
    At
);

/// Sector key - 6 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Key([u8; KEY_SIZE]);

impl Key {
    /// Factory default transport key
    pub const DEFAULT: Self = Self([0xFF; KEY_SIZE]);

    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// 48-bit big-endian value, the form the cipher is keyed with.
    pub fn to_u64(&self) -> u64 {
        self.0.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
    }

    /// Build a key from the low 48 bits of `value`.
    pub fn from_u64(value: u64) -> Self {
        let be = value.to_be_bytes();
        let mut arr = [0u8; KEY_SIZE];
        arr.copy_from_slice(&be[8 - KEY_SIZE..]);
        Self(arr)
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: KEY_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KeyType {
    #[default]
    A,
    B,
}

/// Block contents - 16 bytes, opaque to the poller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, From)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Block([u8; BLOCK_SIZE]);

impl Block {
    pub fn from_bytes(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Encode `value` in the value-block layout:
    /// value, !value, value (LE), then addr, !addr, addr, !addr.
    pub fn from_value(value: i32, addr: u8) -> Self {
        let v = value.to_le_bytes();
        let inv = (!value).to_le_bytes();
        let mut b = [0u8; BLOCK_SIZE];
        b[0..4].copy_from_slice(&v);
        b[4..8].copy_from_slice(&inv);
        b[8..12].copy_from_slice(&v);
        b[12] = addr;
        b[13] = !addr;
        b[14] = addr;
        b[15] = !addr;
        Self(b)
    }

    /// Decode a value block. `None` when the redundancy does not check out.
    pub fn value(&self) -> Option<(i32, u8)> {
        let b = &self.0;
        let word = |i: usize| i32::from_le_bytes([b[i], b[i + 1], b[i + 2], b[i + 3]]);
        let (v0, inv, v1) = (word(0), word(4), word(8));
        if v0 != v1 || v0 != !inv {
            return None;
        }
        if b[12] != b[14] || b[13] != b[15] || b[12] != !b[13] {
            return None;
        }
        Some((v0, b[12]))
    }

    pub fn is_value_block(&self) -> bool {
        self.value().is_some()
    }
}

impl TryFrom<&[u8]> for Block {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; BLOCK_SIZE] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: BLOCK_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

/// Value block arithmetic selected by `value_cmd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueCommand {
    Increment,
    Decrement,
    Restore,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AuthState {
    #[default]
    Idle,
    Passed,
}

/// Challenge/response material captured during authentication.
///
/// Filled progressively: `nt` as soon as the nonce is received, the rest
/// only once the card has answered. `ar` and `at` are the enciphered values
/// seen on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AuthContext {
    pub block_num: u8,
    pub key_type: KeyType,
    pub nt: Nt,
    pub nr: Nr,
    pub ar: Ar,
    pub at: At,
}

/// ISO14443-3A UID (4, 7 or 10 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<u8>", into = "Vec<u8>")
)]
pub struct Uid {
    bytes: [u8; 10],
    len: usize,
}

impl Uid {
    pub const VALID_LENGTHS: [usize; 3] = [4, 7, 10];

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.as_bytes())
    }
}

impl Default for Uid {
    fn default() -> Self {
        Self {
            bytes: [0; 10],
            len: 4,
        }
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if !Self::VALID_LENGTHS.contains(&bytes.len()) {
            return Err(Error::InvalidUidLength(bytes.len()));
        }
        let mut arr = [0u8; 10];
        arr[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            bytes: arr,
            len: bytes.len(),
        })
    }
}

impl TryFrom<Vec<u8>> for Uid {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(bytes.as_slice())
    }
}

impl From<Uid> for Vec<u8> {
    fn from(uid: Uid) -> Self {
        uid.as_bytes().to_vec()
    }
}

/// Card descriptor as selected by the transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CardData {
    pub uid: Uid,
    pub atqa: [u8; 2],
    pub sak: u8,
}

impl CardData {
    pub fn new(uid: Uid, atqa: [u8; 2], sak: u8) -> Self {
        Self { uid, atqa, sak }
    }

    /// Cascade UID used to seed the cipher: the last four UID bytes.
    pub fn cuid(&self) -> u32 {
        let uid = self.uid.as_bytes();
        let tail = &uid[uid.len() - 4..];
        u32::from_be_bytes([tail[0], tail[1], tail[2], tail[3]])
    }
}

/// Sector holding `block`: 32 sectors of 4 blocks, then sectors of 16 blocks.
pub fn sector_of(block: u8) -> u8 {
    if block < 128 {
        block / 4
    } else {
        32 + (block - 128) / 16
    }
}

/// First block of `sector`.
pub fn first_block_of(sector: u8) -> u8 {
    if sector < 32 {
        sector * 4
    } else {
        128 + (sector - 32) * 16
    }
}
