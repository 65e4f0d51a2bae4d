//! Decode Palert mode 16 packets.
//!
//! Mode 16 is the variable-geometry format: the 64-byte header declares the
//! channel count and sampling rate at runtime, and the payload is a flat
//! round-robin stream of 32-bit words whose bit patterns are IEEE-754
//! floats. The payload boundary comes from the header's byte-length field,
//! never from a sample count.

use crate::types::TargetByteOrder;
use crate::{PalertError, Result};

/// Mode 16 header length in bytes.
pub const MODE16_HEADER_LENGTH: usize = 64;
/// Maximum mode 16 packet length in bytes.
pub const MODE16_PACKET_MAX_LENGTH: usize = 1024;

// Header field offsets.
const OFF_PACKET_TYPE: usize = 0;
const OFF_DATA_LEN: usize = 2;
const OFF_DEVICE_TYPE: usize = 4;
const OFF_NCHANNEL: usize = 5;
const OFF_SAMPRATE: usize = 6;
const OFF_TIMESTAMP: usize = 8;
const OFF_MSEC: usize = 12;
const OFF_SERIAL: usize = 14;
const OFF_SCALE: usize = 16;
const OFF_NTP_OFFSET: usize = 20;
const OFF_CONNECTION_FLAG: usize = 24;

/// Zero-copy view over one complete mode 16 packet.
#[derive(Debug, Clone, Copy)]
pub struct Mode16Packet<'a> {
    bytes: &'a [u8],
    endian: TargetByteOrder,
}

impl<'a> Mode16Packet<'a> {
    /// Create a view over a buffer starting with a mode 16 header.
    ///
    /// The buffer must hold at least [`MODE16_HEADER_LENGTH`] bytes; the
    /// payload extent is validated against the declared length during
    /// [`extract_samples`](Mode16Packet::extract_samples).
    pub fn parse(bytes: &'a [u8], endian: TargetByteOrder) -> Result<Self> {
        if bytes.len() < MODE16_HEADER_LENGTH {
            return Err(PalertError::BufferTooShort {
                expected: MODE16_HEADER_LENGTH,
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes, endian })
    }

    fn word(&self, offset: usize) -> u16 {
        self.endian.read_u16(self.bytes, offset)
    }

    fn dword(&self, offset: usize) -> u32 {
        self.endian.read_u32(self.bytes, offset)
    }

    /// Packet type word.
    pub fn packet_type(&self) -> u16 {
        self.word(OFF_PACKET_TYPE)
    }

    /// Declared payload length in bytes (header excluded).
    pub fn data_len(&self) -> usize {
        self.word(OFF_DATA_LEN) as usize
    }

    /// Device type byte.
    pub fn device_type(&self) -> u8 {
        self.bytes[OFF_DEVICE_TYPE]
    }

    /// Declared channel count.
    pub fn nchannel(&self) -> usize {
        self.bytes[OFF_NCHANNEL] as usize
    }

    /// Declared sampling rate in Hz.
    pub fn samprate(&self) -> u16 {
        self.word(OFF_SAMPRATE)
    }

    /// Device serial number.
    pub fn serial(&self) -> u16 {
        self.word(OFF_SERIAL)
    }

    /// Whether the device reports NTP synchronization.
    pub fn ntp_synced(&self) -> bool {
        self.bytes[OFF_CONNECTION_FLAG] & 0x01 != 0
    }

    /// First-sample timestamp as Unix epoch seconds plus fraction.
    ///
    /// The packed timestamp word is epoch seconds; the millisecond word is
    /// stored in 0.1 ms units, hence the 10000.0 divisor.
    pub fn sample_time(&self) -> f64 {
        self.dword(OFF_TIMESTAMP) as f64 + self.word(OFF_MSEC) as f64 / 10000.0
    }

    /// Counts-to-physical scale factor.
    ///
    /// The wire word is the IEEE-754 bit pattern of the factor, so it is
    /// reinterpreted, never numerically converted.
    pub fn scale(&self) -> f32 {
        f32::from_bits(self.dword(OFF_SCALE))
    }

    /// NTP offset of the device clock in seconds.
    pub fn ntp_offset(&self) -> f32 {
        f32::from_bits(self.dword(OFF_NTP_OFFSET))
    }

    /// Samples per channel declared by the payload length, after
    /// validating the payload geometry.
    pub fn sample_count(&self) -> Result<usize> {
        let nchannel = self.nchannel();
        if nchannel == 0 {
            return Err(PalertError::ZeroChannels);
        }
        let data_len = self.data_len();
        if data_len % (4 * nchannel) != 0 {
            return Err(PalertError::BadPayloadLength { data_len, nchannel });
        }
        if self.bytes.len() < MODE16_HEADER_LENGTH + data_len {
            return Err(PalertError::BufferTooShort {
                expected: MODE16_HEADER_LENGTH + data_len,
                actual: self.bytes.len(),
            });
        }
        Ok(data_len / (4 * nchannel))
    }

    /// De-interleave the float payload into per-channel buffers.
    ///
    /// `buffers` holds one optional slot per channel in wire order. Slots
    /// beyond the channel count are ignored; channels without a slot (or
    /// with `None`) are still decoded into a private scratch buffer so the
    /// decode cost is uniform. Each supplied buffer must hold the packet's
    /// full per-channel sample count. Returns the samples written per
    /// channel.
    pub fn extract_samples(&self, buffers: &mut [Option<&mut [f32]>]) -> Result<usize> {
        let nchannel = self.nchannel();
        let nsamples = self.sample_count()?;

        for buf in buffers.iter().take(nchannel).flatten() {
            if buf.len() < nsamples {
                return Err(PalertError::SampleBufferTooShort {
                    expected: nsamples,
                    actual: buf.len(),
                });
            }
        }

        let mut scratch = vec![0.0f32; nsamples];
        let data = &self.bytes[MODE16_HEADER_LENGTH..MODE16_HEADER_LENGTH + self.data_len()];

        for i in 0..nsamples {
            let frame = i * nchannel * 4;
            for ch in 0..nchannel {
                let val = f32::from_bits(self.endian.read_u32(data, frame + ch * 4));
                match buffers.get_mut(ch) {
                    Some(Some(buf)) => buf[i] = val,
                    _ => scratch[i] = val,
                }
            }
        }
        Ok(nsamples)
    }
}
