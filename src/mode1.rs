//! Decode Palert mode 1 packets.
//!
//! A mode 1 packet is a fixed 1024-byte frame: a 64-byte header followed by
//! 96 sample frames of 5 channels x 16-bit two's-complement counts. The
//! channel order is HLZ, HLN, HLE, PD, Disp and never varies.

use crate::ipv4::format_ipv4;
use crate::time::{civil_to_epoch, tenmsec_fraction};
use crate::types::TargetByteOrder;
use crate::{PalertError, Result};

/// Total mode 1 packet length in bytes.
pub const MODE1_PACKET_LENGTH: usize = 1024;
/// Mode 1 header length in bytes.
pub const MODE1_HEADER_LENGTH: usize = 64;
/// Samples per channel in one packet.
pub const MODE1_SAMPLE_COUNT: usize = 96;
/// Fixed channel count.
pub const MODE1_CHANNEL_COUNT: usize = 5;

/// Channel table: (index, display code, physical unit per count).
///
/// Index order matches the on-wire sample slot order and is load-bearing.
/// Acceleration channels are counts-to-gal; displacement channels
/// counts-to-cm.
const CHAN_TABLE: [(&str, f64); MODE1_CHANNEL_COUNT] = [
    ("HLZ", 0.059814),
    ("HLN", 0.059814),
    ("HLE", 0.059814),
    ("PD", 0.001),
    ("Disp", 0.001),
];

/// Trigger-mode table: (display string, event-flag bit).
///
/// Declaration order is a priority: the first entry whose bit is set in the
/// event-flag byte wins.
pub(crate) const TRIGMODE_TABLE: [(&str, u8); 4] = [
    ("Pd", 0x01),
    ("PGA", 0x02),
    ("Pd&PGA", 0x04),
    ("STA/LTA", 0x08),
];

// Header field offsets.
const OFF_PACKET_TYPE: usize = 0;
const OFF_EVENT_FLAG: usize = 2;
const OFF_SYS_YEAR: usize = 4;
const OFF_SYS_MONTH: usize = 6;
const OFF_SYS_DAY: usize = 8;
const OFF_SYS_HOUR: usize = 10;
const OFF_SYS_MINUTE: usize = 12;
const OFF_SYS_SECOND: usize = 14;
const OFF_SYS_TENMSEC: usize = 15;
const OFF_EV_YEAR: usize = 16;
const OFF_EV_MONTH: usize = 18;
const OFF_EV_DAY: usize = 20;
const OFF_EV_HOUR: usize = 22;
const OFF_EV_MINUTE: usize = 24;
const OFF_EV_SECOND: usize = 26;
const OFF_EV_TENMSEC: usize = 27;
const OFF_SERIAL_NO: usize = 28;
const OFF_FIRMWARE: usize = 30;
const OFF_OP_MODE: usize = 32;
const OFF_SAMPRATE: usize = 34;
const OFF_PALERT_IP: usize = 36;
const OFF_NTP_SERVER: usize = 40;
const OFF_TCP0_SERVER: usize = 44;
const OFF_TCP1_SERVER: usize = 48;
const OFF_DIO_STATUS: usize = 52;

/// The four IP addresses a mode 1 header reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode1Ip {
    /// The device's own address.
    Device,
    /// Configured NTP server.
    Ntp,
    /// First TCP data server.
    Tcp0,
    /// Second TCP data server.
    Tcp1,
}

/// Zero-copy view over one complete mode 1 packet.
///
/// Borrows the caller's buffer; nothing is copied until samples are
/// extracted into caller-supplied buffers.
#[derive(Debug, Clone, Copy)]
pub struct Mode1Packet<'a> {
    bytes: &'a [u8],
    endian: TargetByteOrder,
}

impl<'a> Mode1Packet<'a> {
    /// Create a view over a complete mode 1 packet buffer.
    ///
    /// The buffer must hold at least [`MODE1_PACKET_LENGTH`] bytes.
    pub fn parse(bytes: &'a [u8], endian: TargetByteOrder) -> Result<Self> {
        if bytes.len() < MODE1_PACKET_LENGTH {
            return Err(PalertError::BufferTooShort {
                expected: MODE1_PACKET_LENGTH,
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes, endian })
    }

    fn word(&self, offset: usize) -> u16 {
        self.endian.read_u16(self.bytes, offset)
    }

    /// Packet type word.
    pub fn packet_type(&self) -> u16 {
        self.word(OFF_PACKET_TYPE)
    }

    /// Device serial number.
    pub fn serial(&self) -> u16 {
        self.word(OFF_SERIAL_NO)
    }

    /// Firmware version word.
    pub fn firmware(&self) -> u16 {
        self.word(OFF_FIRMWARE)
    }

    /// Operation mode word.
    pub fn op_mode(&self) -> u16 {
        self.word(OFF_OP_MODE)
    }

    /// Declared sampling rate in Hz.
    pub fn samprate(&self) -> u16 {
        self.word(OFF_SAMPRATE)
    }

    /// Raw event-flag byte (trigger bits).
    pub fn event_flag(&self) -> u8 {
        self.bytes[OFF_EVENT_FLAG]
    }

    /// Raw digital I/O status word.
    pub fn dio_status(&self) -> u16 {
        self.word(OFF_DIO_STATUS)
    }

    /// Device system time as Unix epoch seconds plus fraction.
    ///
    /// `tz_offset_sec` is added as-is; pass 0 for a device clock already
    /// running UTC.
    pub fn system_time(&self, tz_offset_sec: i64) -> f64 {
        self.packed_time(
            OFF_SYS_YEAR,
            OFF_SYS_MONTH,
            OFF_SYS_DAY,
            OFF_SYS_HOUR,
            OFF_SYS_MINUTE,
            OFF_SYS_SECOND,
            OFF_SYS_TENMSEC,
            tz_offset_sec,
        )
    }

    /// Latest trigger event time as Unix epoch seconds plus fraction.
    pub fn event_time(&self, tz_offset_sec: i64) -> f64 {
        self.packed_time(
            OFF_EV_YEAR,
            OFF_EV_MONTH,
            OFF_EV_DAY,
            OFF_EV_HOUR,
            OFF_EV_MINUTE,
            OFF_EV_SECOND,
            OFF_EV_TENMSEC,
            tz_offset_sec,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn packed_time(
        &self,
        year: usize,
        month: usize,
        day: usize,
        hour: usize,
        minute: usize,
        second: usize,
        tenmsec: usize,
        tz_offset_sec: i64,
    ) -> f64 {
        let epoch = civil_to_epoch(
            self.word(year) as i64,
            self.word(month) as i64,
            self.word(day) as i64,
            self.word(hour) as i64,
            self.word(minute) as i64,
            self.bytes[second] as i64,
        );
        (epoch + tz_offset_sec) as f64 + tenmsec_fraction(self.bytes[tenmsec])
    }

    /// Display code for a 0-based channel index.
    pub fn channel_code(&self, index: usize) -> Result<&'static str> {
        CHAN_TABLE
            .get(index)
            .map(|&(code, _)| code)
            .ok_or(PalertError::ChannelOutOfRange {
                index,
                count: MODE1_CHANNEL_COUNT,
            })
    }

    /// Physical unit conversion factor for a 0-based channel index.
    pub fn channel_unit(&self, index: usize) -> Result<f64> {
        CHAN_TABLE
            .get(index)
            .map(|&(_, unit)| unit)
            .ok_or(PalertError::ChannelOutOfRange {
                index,
                count: MODE1_CHANNEL_COUNT,
            })
    }

    /// Trigger mode of the current event, or `None` when no trigger bit is
    /// set. Table order decides ties when several bits are set.
    pub fn trigger_mode(&self) -> Option<&'static str> {
        let flag = self.event_flag();
        TRIGMODE_TABLE
            .iter()
            .find(|&&(_, bit)| flag & bit != 0)
            .map(|&(name, _)| name)
    }

    /// One of the header's IP addresses in dotted-decimal form.
    ///
    /// The two TCP server addresses come off the wire with octets in
    /// `[1, 0, 3, 2]` order. That reordering is real hardware behavior and
    /// is preserved exactly.
    pub fn ip(&self, kind: Mode1Ip) -> String {
        let oct = |offset: usize| -> [u8; 4] {
            [
                self.bytes[offset],
                self.bytes[offset + 1],
                self.bytes[offset + 2],
                self.bytes[offset + 3],
            ]
        };
        match kind {
            Mode1Ip::Device => {
                let o = oct(OFF_PALERT_IP);
                format_ipv4(o[0], o[1], o[2], o[3])
            }
            Mode1Ip::Ntp => {
                let o = oct(OFF_NTP_SERVER);
                format_ipv4(o[0], o[1], o[2], o[3])
            }
            Mode1Ip::Tcp0 => {
                let o = oct(OFF_TCP0_SERVER);
                format_ipv4(o[1], o[0], o[3], o[2])
            }
            Mode1Ip::Tcp1 => {
                let o = oct(OFF_TCP1_SERVER);
                format_ipv4(o[1], o[0], o[3], o[2])
            }
        }
    }

    /// De-interleave the 5-channel sample payload into per-channel buffers.
    ///
    /// `buffers` holds one slot per channel in table order; a `None` slot is
    /// still decoded but discarded into a private scratch buffer, so decode
    /// cost does not depend on how many channels the caller wants. Each
    /// supplied buffer must hold at least [`MODE1_SAMPLE_COUNT`] samples.
    pub fn extract_samples(
        &self,
        mut buffers: [Option<&mut [i32]>; MODE1_CHANNEL_COUNT],
    ) -> Result<()> {
        for buf in buffers.iter().flatten() {
            if buf.len() < MODE1_SAMPLE_COUNT {
                return Err(PalertError::SampleBufferTooShort {
                    expected: MODE1_SAMPLE_COUNT,
                    actual: buf.len(),
                });
            }
        }

        let mut scratch = [0i32; MODE1_SAMPLE_COUNT];
        let data = &self.bytes[MODE1_HEADER_LENGTH..MODE1_PACKET_LENGTH];

        for i in 0..MODE1_SAMPLE_COUNT {
            let frame = i * MODE1_CHANNEL_COUNT * 2;
            for (ch, slot) in buffers.iter_mut().enumerate() {
                let raw = self.endian.read_u16(data, frame + ch * 2);
                let val = raw as i16 as i32;
                match slot {
                    Some(buf) => buf[i] = val,
                    None => scratch[i] = val,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_packet() -> Vec<u8> {
        vec![0u8; MODE1_PACKET_LENGTH]
    }

    fn put_word(buf: &mut [u8], offset: usize, value: u16) {
        buf[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
    }

    fn put_sample(buf: &mut [u8], sample: usize, channel: usize, value: i16) {
        let off = MODE1_HEADER_LENGTH + (sample * MODE1_CHANNEL_COUNT + channel) * 2;
        buf[off..off + 2].copy_from_slice(&value.to_le_bytes());
    }

    #[test]
    fn test_parse_rejects_short_buffer() {
        let buf = vec![0u8; MODE1_PACKET_LENGTH - 1];
        let err = Mode1Packet::parse(&buf, TargetByteOrder::Little).unwrap_err();
        assert!(matches!(err, PalertError::BufferTooShort { .. }));
    }

    #[test]
    fn test_system_time() {
        let mut buf = blank_packet();
        // 2024-06-03 08:30:15.50 UTC
        put_word(&mut buf, OFF_SYS_YEAR, 2024);
        put_word(&mut buf, OFF_SYS_MONTH, 6);
        put_word(&mut buf, OFF_SYS_DAY, 3);
        put_word(&mut buf, OFF_SYS_HOUR, 8);
        put_word(&mut buf, OFF_SYS_MINUTE, 30);
        buf[OFF_SYS_SECOND] = 15;
        buf[OFF_SYS_TENMSEC] = 50;

        let pkt = Mode1Packet::parse(&buf, TargetByteOrder::Little).unwrap();
        assert_eq!(pkt.system_time(0), 1_717_403_415.5);
        // Taiwan local clock: UTC+8 reported, caller subtracts the offset
        assert_eq!(pkt.system_time(-28_800), 1_717_403_415.5 - 28_800.0);
    }

    #[test]
    fn test_event_time_independent_of_system_time() {
        let mut buf = blank_packet();
        put_word(&mut buf, OFF_EV_YEAR, 2000);
        put_word(&mut buf, OFF_EV_MONTH, 2);
        put_word(&mut buf, OFF_EV_DAY, 29);
        let pkt = Mode1Packet::parse(&buf, TargetByteOrder::Little).unwrap();
        assert_eq!(pkt.event_time(0), 951_782_400.0);
    }

    #[test]
    fn test_both_byte_orders_decode_same_header() {
        let mut buf = blank_packet();
        put_word(&mut buf, OFF_SERIAL_NO, 0x1234);
        let le = Mode1Packet::parse(&buf, TargetByteOrder::Little).unwrap();
        let be = Mode1Packet::parse(&buf, TargetByteOrder::Big).unwrap();
        assert_eq!(le.serial(), 0x1234);
        assert_eq!(be.serial(), 0x1234);
    }

    #[test]
    fn test_channel_table() {
        let buf = blank_packet();
        let pkt = Mode1Packet::parse(&buf, TargetByteOrder::Little).unwrap();
        assert_eq!(pkt.channel_code(0).unwrap(), "HLZ");
        assert_eq!(pkt.channel_code(1).unwrap(), "HLN");
        assert_eq!(pkt.channel_code(2).unwrap(), "HLE");
        assert_eq!(pkt.channel_code(3).unwrap(), "PD");
        assert_eq!(pkt.channel_code(4).unwrap(), "Disp");
        assert_eq!(pkt.channel_unit(0).unwrap(), 0.059814);
        assert_eq!(pkt.channel_unit(4).unwrap(), 0.001);
    }

    #[test]
    fn test_channel_index_out_of_range() {
        let buf = blank_packet();
        let pkt = Mode1Packet::parse(&buf, TargetByteOrder::Little).unwrap();
        let err = pkt.channel_code(5).unwrap_err();
        assert!(matches!(
            err,
            PalertError::ChannelOutOfRange { index: 5, count: 5 }
        ));
        assert!(pkt.channel_unit(100).is_err());
    }

    #[test]
    fn test_trigger_mode_first_match_priority() {
        let mut buf = blank_packet();
        buf[OFF_EVENT_FLAG] = 0x0A; // PGA and STA/LTA both set
        let pkt = Mode1Packet::parse(&buf, TargetByteOrder::Little).unwrap();
        assert_eq!(pkt.trigger_mode(), Some("PGA"));
    }

    #[test]
    fn test_trigger_mode_none_matched() {
        let mut buf = blank_packet();
        buf[OFF_EVENT_FLAG] = 0xF0; // no table bit set
        let pkt = Mode1Packet::parse(&buf, TargetByteOrder::Little).unwrap();
        assert_eq!(pkt.trigger_mode(), None);
    }

    #[test]
    fn test_ip_accessors() {
        let mut buf = blank_packet();
        buf[OFF_PALERT_IP..OFF_PALERT_IP + 4].copy_from_slice(&[192, 168, 1, 20]);
        buf[OFF_NTP_SERVER..OFF_NTP_SERVER + 4].copy_from_slice(&[10, 0, 0, 1]);
        buf[OFF_TCP0_SERVER..OFF_TCP0_SERVER + 4].copy_from_slice(&[1, 2, 3, 4]);
        buf[OFF_TCP1_SERVER..OFF_TCP1_SERVER + 4].copy_from_slice(&[140, 112, 65, 210]);

        let pkt = Mode1Packet::parse(&buf, TargetByteOrder::Little).unwrap();
        assert_eq!(pkt.ip(Mode1Ip::Device), "192.168.1.20");
        assert_eq!(pkt.ip(Mode1Ip::Ntp), "10.0.0.1");
        // TCP addresses keep the wire's swapped octet order
        assert_eq!(pkt.ip(Mode1Ip::Tcp0), "2.1.4.3");
        assert_eq!(pkt.ip(Mode1Ip::Tcp1), "112.140.210.65");
    }

    #[test]
    fn test_extract_samples_exact_values() {
        let mut buf = blank_packet();
        put_sample(&mut buf, 0, 0, 100);
        put_sample(&mut buf, 0, 1, -1); // 0xFFFF
        put_sample(&mut buf, 0, 2, i16::MIN);
        put_sample(&mut buf, 0, 3, i16::MAX);
        put_sample(&mut buf, 1, 0, -32000);
        put_sample(&mut buf, 95, 4, 42);

        let pkt = Mode1Packet::parse(&buf, TargetByteOrder::Little).unwrap();
        let mut hlz = [0i32; MODE1_SAMPLE_COUNT];
        let mut hln = [0i32; MODE1_SAMPLE_COUNT];
        let mut hle = [0i32; MODE1_SAMPLE_COUNT];
        let mut pd = [0i32; MODE1_SAMPLE_COUNT];
        let mut disp = [0i32; MODE1_SAMPLE_COUNT];
        pkt.extract_samples([
            Some(&mut hlz),
            Some(&mut hln),
            Some(&mut hle),
            Some(&mut pd),
            Some(&mut disp),
        ])
        .unwrap();

        assert_eq!(hlz[0], 100);
        assert_eq!(hln[0], -1);
        assert_eq!(hle[0], -32768);
        assert_eq!(pd[0], 32767);
        assert_eq!(hlz[1], -32000);
        assert_eq!(disp[95], 42);
    }

    #[test]
    fn test_extract_samples_omitted_buffers() {
        let mut buf = blank_packet();
        put_sample(&mut buf, 3, 0, 7);
        put_sample(&mut buf, 3, 2, -9);

        let pkt = Mode1Packet::parse(&buf, TargetByteOrder::Little).unwrap();
        let mut hle = [0i32; MODE1_SAMPLE_COUNT];
        pkt.extract_samples([None, None, Some(&mut hle), None, None])
            .unwrap();
        assert_eq!(hle[3], -9);
    }

    #[test]
    fn test_extract_samples_big_endian_target() {
        let mut buf = blank_packet();
        put_sample(&mut buf, 0, 0, -1234);
        let pkt = Mode1Packet::parse(&buf, TargetByteOrder::Big).unwrap();
        let mut hlz = [0i32; MODE1_SAMPLE_COUNT];
        pkt.extract_samples([Some(&mut hlz), None, None, None, None])
            .unwrap();
        assert_eq!(hlz[0], -1234);
    }

    #[test]
    fn test_extract_samples_short_output_buffer() {
        let buf = blank_packet();
        let pkt = Mode1Packet::parse(&buf, TargetByteOrder::Little).unwrap();
        let mut short = [0i32; 10];
        let err = pkt
            .extract_samples([Some(&mut short), None, None, None, None])
            .unwrap_err();
        assert!(matches!(err, PalertError::SampleBufferTooShort { .. }));
    }
}
