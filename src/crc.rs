//! CRC-16 for Palert packet integrity.
//!
//! Uses the reflected Modbus polynomial `0xA001` with initial register
//! `0xFFFF`. The mode 4 header embeds a CRC over its packet-information
//! block; a mismatch means the packet is corrupt and must be dropped.

use std::sync::OnceLock;

/// Reflected CRC-16 polynomial.
pub const CRC16_POLY: u16 = 0xA001;
/// Initial register value. `crc16` of empty input returns this unchanged.
pub const CRC16_INIT: u16 = 0xFFFF;

static CRC16_TABLE: OnceLock<[u16; 256]> = OnceLock::new();

fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    for (i, entry) in table.iter_mut().enumerate() {
        let mut crc = i as u16;
        for _ in 0..8 {
            if crc & 0x01 != 0 {
                crc = (crc >> 1) ^ CRC16_POLY;
            } else {
                crc >>= 1;
            }
        }
        *entry = crc;
    }
    table
}

/// Build the CRC-16 lookup table.
///
/// Idempotent; the table is built at most once per process. Calling this
/// before spawning decoder threads avoids any contention on first use,
/// but `crc16` also builds it lazily on demand.
pub fn init() {
    CRC16_TABLE.get_or_init(build_table);
}

/// Compute the CRC-16 of the given data.
///
/// Empty input returns [`CRC16_INIT`] unchanged, which callers use to tell
/// "nothing to check" apart from a real mismatch.
pub fn crc16(data: &[u8]) -> u16 {
    let table = CRC16_TABLE.get_or_init(build_table);
    let mut reg = CRC16_INIT;
    for &byte in data {
        reg = (reg >> 8) ^ table[((reg ^ byte as u16) & 0x00FF) as usize];
    }
    reg
}
