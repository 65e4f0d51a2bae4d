//! Pure Rust decoder for Palert seismic telemetry packets.
//!
//! Zero `unsafe`, zero C dependencies, no I/O. Decodes the three historical
//! Palert wire formats — mode 1 (fixed 5-channel acceleration frames),
//! mode 4 (CRC-checked generic header) and mode 16 (variable-channel float
//! streams) — as pure functions over caller-owned byte buffers. The caller
//! is responsible for transport and framing; every function here expects
//! exactly one complete packet.
//!
//! # Checking a mode 4 header
//!
//! ```
//! use palert_rs::{crc16, is_mode4, Mode4Header, TargetByteOrder, MODE4_SYNC_WORD};
//!
//! let mut raw = vec![0u8; 64];
//! raw[58..62].copy_from_slice(&MODE4_SYNC_WORD);
//! let crc = crc16(&raw[..8]);
//! raw[6..8].copy_from_slice(&crc.to_le_bytes());
//!
//! assert!(is_mode4(&raw));
//! let header = Mode4Header::parse(&raw, TargetByteOrder::Little).unwrap();
//! header.sync_check().unwrap();
//! header.crc_check().unwrap();
//! ```
//!
//! # Extracting mode 16 samples
//!
//! ```
//! use palert_rs::{Mode16Packet, TargetByteOrder};
//!
//! // 64-byte header + 2 channels x 2 samples of 32-bit float words
//! let mut raw = vec![0u8; 64 + 16];
//! raw[2..4].copy_from_slice(&16u16.to_le_bytes()); // payload length
//! raw[5] = 2; // channel count
//! for (i, v) in [1.0f32, 2.0, 3.0, 4.0].iter().enumerate() {
//!     raw[64 + i * 4..64 + i * 4 + 4].copy_from_slice(&v.to_bits().to_le_bytes());
//! }
//!
//! let packet = Mode16Packet::parse(&raw, TargetByteOrder::Little).unwrap();
//! let mut ch0 = [0.0f32; 2];
//! let mut ch1 = [0.0f32; 2];
//! let n = packet
//!     .extract_samples(&mut [Some(&mut ch0), Some(&mut ch1)])
//!     .unwrap();
//!
//! assert_eq!(n, 2);
//! assert_eq!(ch0, [1.0, 3.0]);
//! assert_eq!(ch1, [2.0, 4.0]);
//! ```
//!
//! # Rebuilding calendar time
//!
//! ```
//! use palert_rs::civil_to_epoch;
//!
//! assert_eq!(civil_to_epoch(1970, 1, 1, 0, 0, 0), 0);
//! assert_eq!(civil_to_epoch(2000, 2, 29, 0, 0, 0), 951_782_400);
//! ```

pub mod crc;
pub mod error;
pub mod ipv4;
pub mod mode1;
pub mod mode16;
pub mod mode4;
pub mod time;
pub mod types;

pub use error::{PalertError, Result};
pub use types::TargetByteOrder;

pub use crc::{crc16, CRC16_INIT, CRC16_POLY};
pub use ipv4::format_ipv4;
pub use time::{civil_to_epoch, tenmsec_fraction};

pub use mode1::{
    Mode1Ip, Mode1Packet, MODE1_CHANNEL_COUNT, MODE1_HEADER_LENGTH, MODE1_PACKET_LENGTH,
    MODE1_SAMPLE_COUNT,
};
pub use mode16::{Mode16Packet, MODE16_HEADER_LENGTH, MODE16_PACKET_MAX_LENGTH};
pub use mode4::{
    is_mode4, Mode4Header, Mode4Ip, MODE4_CRC_CAL_LENGTH, MODE4_HEADER_LENGTH,
    MODE4_PACKET_MAX_LENGTH, MODE4_SYNC_WORD,
};
