// mfclassic/src/protocol/checksum.rs

use crate::constants::CRC_SIZE;
use crate::protocol::BitBuffer;

/// Compute the ISO14443-3 Type A CRC (CRC_A) over `data`.
/// Initial value 0x6363, reflected polynomial 0x8408, no final XOR.
pub fn crc_a(data: &[u8]) -> u16 {
    data.iter().fold(0x6363u16, |crc, &b| {
        let mut ch = b ^ (crc & 0x00ff) as u8;
        ch ^= ch << 4;
        let ch = u16::from(ch);
        (crc >> 8) ^ (ch << 8) ^ (ch << 3) ^ (ch >> 4)
    })
}

/// Append CRC_A (LSB first) to a byte-aligned frame.
pub fn append_crc_a(buf: &mut BitBuffer) {
    let crc = crc_a(buf.data());
    buf.append_bytes(&crc.to_le_bytes());
}

/// True when the frame is longer than its CRC and the trailing CRC_A matches.
pub fn check_crc_a(buf: &BitBuffer) -> bool {
    let data = buf.data();
    if data.len() <= CRC_SIZE || buf.size_bits() % 8 != 0 {
        return false;
    }
    let (payload, trailer) = data.split_at(data.len() - CRC_SIZE);
    crc_a(payload).to_le_bytes() == [trailer[0], trailer[1]]
}

/// Strip the trailing CRC_A.
pub fn trim_crc_a(buf: &mut BitBuffer) {
    let len = buf.size_bytes().saturating_sub(CRC_SIZE);
    buf.truncate_bytes(len);
}
