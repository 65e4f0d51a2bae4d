//! Shared types: [`TargetByteOrder`] and wire-word reassembly.
//!
//! Palert hardware stores every multi-byte header field least-significant
//! byte first. The original C library carried two codepaths per accessor,
//! selected by the target CPU: a native-width read on little-endian hosts
//! and an explicit `(b[1] << 8) + b[0]` byte reassembly on big-endian ones.
//! Here both live behind one configuration value and one routine per width;
//! the two variants decode identical values from identical wire bytes.

use std::fmt;

/// Target byte-order configuration for multi-byte field accessors.
///
/// Resolved once per deployment and threaded through each packet view at
/// construction; never auto-detected per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetByteOrder {
    /// Little-endian target: fields read as native-width integers.
    #[default]
    Little,
    /// Big-endian target: fields reassembled explicitly, high byte last.
    Big,
}

impl TargetByteOrder {
    /// Read a 16-bit wire word at `offset`.
    pub fn read_u16(self, data: &[u8], offset: usize) -> u16 {
        match self {
            Self::Little => u16::from_le_bytes([data[offset], data[offset + 1]]),
            Self::Big => ((data[offset + 1] as u16) << 8) | data[offset] as u16,
        }
    }

    /// Read a 32-bit wire word at `offset`, assembled from two 16-bit
    /// halves, low word first.
    pub fn read_u32(self, data: &[u8], offset: usize) -> u32 {
        let low = self.read_u16(data, offset) as u32;
        let high = self.read_u16(data, offset + 2) as u32;
        (high << 16) | low
    }
}

impl fmt::Display for TargetByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Little => write!(f, "little-endian"),
            Self::Big => write!(f, "big-endian"),
        }
    }
}
