// mfclassic/src/protocol/bit_buffer.rs

/// Odd parity bit for one byte as sent on an ISO14443-3A link.
pub fn odd_parity(byte: u8) -> bool {
    byte.count_ones() % 2 == 0
}

/// A frame as exchanged over ISO14443-3A: bytes, a size in bits and one
/// parity bit per (started) byte.
///
/// Short frames such as the 4-bit ACK are not byte aligned, so the size is
/// tracked in bits. Unused bits of a partial last byte are kept at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    data: Vec<u8>,
    parity: Vec<bool>,
    size_bits: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            data: Vec::with_capacity(bytes),
            parity: Vec::with_capacity(bytes),
            size_bits: 0,
        }
    }

    /// Byte-aligned frame with computed odd parity.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut buf = Self::with_capacity(bytes.len());
        buf.copy_bytes(bytes);
        buf
    }

    /// Frame of `size_bits` bits taken from `bytes`, with computed odd parity.
    pub fn from_bits(bytes: &[u8], size_bits: usize) -> Self {
        let mut buf = Self::with_capacity(bytes.len());
        buf.copy_bits(bytes, size_bits);
        buf
    }

    pub fn reset(&mut self) {
        self.data.clear();
        self.parity.clear();
        self.size_bits = 0;
    }

    /// Replace the content with `bytes`, computing odd parity.
    pub fn copy_bytes(&mut self, bytes: &[u8]) {
        self.copy_bits(bytes, bytes.len() * 8);
    }

    /// Replace the content with the first `size_bits` bits of `bytes`.
    /// `size_bits` is clamped to what `bytes` can hold.
    pub fn copy_bits(&mut self, bytes: &[u8], size_bits: usize) {
        let size_bits = size_bits.min(bytes.len() * 8);
        let len = size_bits.div_ceil(8);
        self.reset();
        self.data.extend_from_slice(&bytes[..len]);
        self.size_bits = size_bits;
        self.mask_tail();
        self.parity.extend(self.data.iter().map(|&b| odd_parity(b)));
    }

    /// Replace the content with bytes and explicitly supplied parity bits.
    /// Missing parity entries default to odd parity of the byte.
    pub fn load(&mut self, bytes: &[u8], parity: &[bool], size_bits: usize) {
        self.copy_bits(bytes, size_bits);
        for (slot, &p) in self.parity.iter_mut().zip(parity) {
            *slot = p;
        }
    }

    pub fn copy_from(&mut self, other: &BitBuffer) {
        self.data.clone_from(&other.data);
        self.parity.clone_from(&other.parity);
        self.size_bits = other.size_bits;
    }

    /// Append whole bytes with computed odd parity. A partial last byte is
    /// treated as complete before appending.
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.size_bits = self.data.len() * 8;
        self.data.extend_from_slice(bytes);
        self.parity.extend(bytes.iter().map(|&b| odd_parity(b)));
        self.size_bits += bytes.len() * 8;
    }

    /// Drop bytes from the end (whole bytes only).
    pub fn truncate_bytes(&mut self, len: usize) {
        if len < self.data.len() {
            self.data.truncate(len);
            self.parity.truncate(len);
            self.size_bits = len * 8;
        }
    }

    pub fn size_bits(&self) -> usize {
        self.size_bits
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size_bits == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn parity(&self) -> &[bool] {
        &self.parity
    }

    pub fn byte(&self, index: usize) -> Option<u8> {
        self.data.get(index).copied()
    }

    /// Copy as many bytes as fit into `out`; returns the count written.
    pub fn write_bytes(&self, out: &mut [u8]) -> usize {
        let n = out.len().min(self.data.len());
        out[..n].copy_from_slice(&self.data[..n]);
        n
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.data)
    }

    fn mask_tail(&mut self) {
        let rem = self.size_bits % 8;
        if rem != 0 {
            if let Some(last) = self.data.last_mut() {
                *last &= (1u8 << rem) - 1;
            }
        }
    }
}
