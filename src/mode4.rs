//! Decode Palert mode 4 packet headers.
//!
//! Mode 4 is the device's generic framed format: a 64-byte header carrying
//! packet, hardware and network information, terminated by a 4-byte sync
//! word. Header integrity is covered by a CRC16 over the 8-byte
//! packet-information block. Only the header is decoded here; the payload
//! interpretation depends on the declared packet type.

use crate::crc::crc16;
use crate::ipv4::format_ipv4;
use crate::mode1::TRIGMODE_TABLE;
use crate::types::TargetByteOrder;
use crate::{PalertError, Result};

/// Mode 4 header length in bytes.
pub const MODE4_HEADER_LENGTH: usize = 64;
/// Maximum mode 4 packet length in bytes.
pub const MODE4_PACKET_MAX_LENGTH: usize = 65536;
/// Length of the CRC-covered packet-information prefix.
pub const MODE4_CRC_CAL_LENGTH: usize = 8;
/// The sync word closing every mode 4 header.
pub const MODE4_SYNC_WORD: [u8; 4] = [0x03, 0x05, 0x15, 0x01];

/// Number of digital I/O lines reported by the header.
pub const MODE4_DIO_COUNT: usize = 16;

// Header field offsets, per the vendor layout.
const OFF_PACKET_TYPE: usize = 0;
const OFF_PACKET_LEN: usize = 2;
const OFF_DEVICE_TYPE: usize = 4;
const OFF_CHANNEL_NUMBER: usize = 5;
const OFF_CRC16: usize = 6;
const OFF_FIRMWARE: usize = 8;
const OFF_SERIAL: usize = 10;
const OFF_CONNECTION_FLAG: usize = 12;
const OFF_TRIGGER_FLAG: usize = 14;
const OFF_OP_MODE: usize = 16;
const OFF_DIO_STATUS: usize = 18;
const OFF_FILTER_TRIGGER_MODE: usize = 20;
const OFF_NTP_SERVER: usize = 22;
const OFF_TCP0_SERVER: usize = 26;
const OFF_TCP1_SERVER: usize = 30;
const OFF_TCP2_SERVER: usize = 34;
const OFF_ADMIN0_SERVER: usize = 38;
const OFF_ADMIN1_SERVER: usize = 42;
const OFF_PALERT_IP: usize = 46;
const OFF_SUBNET_MASK: usize = 50;
const OFF_GATEWAY_IP: usize = 54;
const OFF_SYNC_CHAR: usize = 58;

/// The nine IP addresses a mode 4 header reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode4Ip {
    Ntp,
    Tcp0,
    Tcp1,
    Tcp2,
    Admin0,
    Admin1,
    Device,
    Netmask,
    Gateway,
}

/// Check whether a raw buffer looks like a mode 4 packet.
///
/// Tests the sync word at its fixed header position; used to pick a decoder
/// among candidate modes before any field is trusted.
pub fn is_mode4(bytes: &[u8]) -> bool {
    bytes.len() >= OFF_SYNC_CHAR + 4 && bytes[OFF_SYNC_CHAR..OFF_SYNC_CHAR + 4] == MODE4_SYNC_WORD
}

/// Zero-copy view over a mode 4 packet header.
#[derive(Debug, Clone, Copy)]
pub struct Mode4Header<'a> {
    bytes: &'a [u8],
    endian: TargetByteOrder,
}

impl<'a> Mode4Header<'a> {
    /// Create a view over a buffer starting with a mode 4 header.
    ///
    /// The buffer must hold at least [`MODE4_HEADER_LENGTH`] bytes. Neither
    /// the sync word nor the CRC is verified here; call [`sync_check`] and
    /// [`crc_check`] before trusting the fields.
    ///
    /// [`sync_check`]: Mode4Header::sync_check
    /// [`crc_check`]: Mode4Header::crc_check
    pub fn parse(bytes: &'a [u8], endian: TargetByteOrder) -> Result<Self> {
        if bytes.len() < MODE4_HEADER_LENGTH {
            return Err(PalertError::BufferTooShort {
                expected: MODE4_HEADER_LENGTH,
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes, endian })
    }

    fn word(&self, offset: usize) -> u16 {
        self.endian.read_u16(self.bytes, offset)
    }

    /// Verify the sync word. Failure means "not a mode 4 packet".
    pub fn sync_check(&self) -> Result<()> {
        if self.bytes[OFF_SYNC_CHAR..OFF_SYNC_CHAR + 4] == MODE4_SYNC_WORD {
            Ok(())
        } else {
            Err(PalertError::BadSyncWord)
        }
    }

    /// Verify the header CRC16.
    ///
    /// The CRC covers the first [`MODE4_CRC_CAL_LENGTH`] header bytes with
    /// the embedded CRC word zeroed. A mismatch is transmission corruption;
    /// the caller should drop the packet.
    pub fn crc_check(&self) -> Result<()> {
        let mut prefix = [0u8; MODE4_CRC_CAL_LENGTH];
        prefix.copy_from_slice(&self.bytes[..MODE4_CRC_CAL_LENGTH]);
        prefix[OFF_CRC16] = 0;
        prefix[OFF_CRC16 + 1] = 0;

        let computed = crc16(&prefix);
        let stored = self.word(OFF_CRC16);
        if computed == stored {
            Ok(())
        } else {
            Err(PalertError::CrcMismatch { stored, computed })
        }
    }

    /// Packet type word.
    pub fn packet_type(&self) -> u16 {
        self.word(OFF_PACKET_TYPE)
    }

    /// Declared total packet length in bytes.
    pub fn packet_len(&self) -> u16 {
        self.word(OFF_PACKET_LEN)
    }

    /// Device type byte.
    pub fn device_type(&self) -> u8 {
        self.bytes[OFF_DEVICE_TYPE]
    }

    /// Declared channel count.
    pub fn channel_number(&self) -> u8 {
        self.bytes[OFF_CHANNEL_NUMBER]
    }

    /// Firmware version word.
    pub fn firmware(&self) -> u16 {
        self.word(OFF_FIRMWARE)
    }

    /// Device serial number.
    pub fn serial(&self) -> u16 {
        self.word(OFF_SERIAL)
    }

    /// Whether the device reports NTP synchronization.
    pub fn ntp_synced(&self) -> bool {
        self.bytes[OFF_CONNECTION_FLAG] & 0x01 != 0
    }

    /// Raw trigger-flag word.
    pub fn trigger_flag(&self) -> u16 {
        self.word(OFF_TRIGGER_FLAG)
    }

    /// Operation mode word.
    pub fn op_mode(&self) -> u16 {
        self.word(OFF_OP_MODE)
    }

    /// Filter trigger mode word.
    pub fn filter_trigger_mode(&self) -> u16 {
        self.word(OFF_FILTER_TRIGGER_MODE)
    }

    /// State of one digital I/O line (0-15).
    pub fn dio_status(&self, line: usize) -> Result<bool> {
        if line >= MODE4_DIO_COUNT {
            return Err(PalertError::ChannelOutOfRange {
                index: line,
                count: MODE4_DIO_COUNT,
            });
        }
        let byte = self.bytes[OFF_DIO_STATUS + line / 8];
        Ok(byte & (0x01 << (line % 8)) != 0)
    }

    /// Trigger mode of the current event, first-match priority over the
    /// trigger-flag byte; `None` when no bit matches.
    pub fn trigger_mode(&self) -> Option<&'static str> {
        let flag = self.bytes[OFF_TRIGGER_FLAG];
        TRIGMODE_TABLE
            .iter()
            .find(|&&(_, bit)| flag & bit != 0)
            .map(|&(name, _)| name)
    }

    /// One of the header's IP addresses in dotted-decimal form.
    ///
    /// All mode 4 addresses use natural octet order; the TCP octet swap is
    /// a mode 1 quirk only.
    pub fn ip(&self, kind: Mode4Ip) -> String {
        let offset = match kind {
            Mode4Ip::Ntp => OFF_NTP_SERVER,
            Mode4Ip::Tcp0 => OFF_TCP0_SERVER,
            Mode4Ip::Tcp1 => OFF_TCP1_SERVER,
            Mode4Ip::Tcp2 => OFF_TCP2_SERVER,
            Mode4Ip::Admin0 => OFF_ADMIN0_SERVER,
            Mode4Ip::Admin1 => OFF_ADMIN1_SERVER,
            Mode4Ip::Device => OFF_PALERT_IP,
            Mode4Ip::Netmask => OFF_SUBNET_MASK,
            Mode4Ip::Gateway => OFF_GATEWAY_IP,
        };
        format_ipv4(
            self.bytes[offset],
            self.bytes[offset + 1],
            self.bytes[offset + 2],
            self.bytes[offset + 3],
        )
    }
}
