//! Error types for Palert packet decoding.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PalertError {
    #[error("packet buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("mode 4 sync word mismatch")]
    BadSyncWord,

    #[error("CRC16 mismatch: stored {stored:#06X}, computed {computed:#06X}")]
    CrcMismatch { stored: u16, computed: u16 },

    #[error("channel index {index} out of range: packet has {count} channels")]
    ChannelOutOfRange { index: usize, count: usize },

    #[error(
        "payload length {data_len} is not a multiple of one sample frame ({nchannel} channels x 4 bytes)"
    )]
    BadPayloadLength { data_len: usize, nchannel: usize },

    #[error("header declares zero channels")]
    ZeroChannels,

    #[error("sample buffer too short: need {expected} samples, got {actual}")]
    SampleBufferTooShort { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, PalertError>;
