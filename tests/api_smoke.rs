//! Compile-time smoke test: verify top-level re-exports work.

use palert_rs::{
    civil_to_epoch, crc16, format_ipv4, is_mode4, Mode16Packet, Mode1Ip, Mode1Packet, Mode4Header,
    Mode4Ip, PalertError, Result, TargetByteOrder, CRC16_INIT, MODE1_CHANNEL_COUNT,
    MODE1_PACKET_LENGTH, MODE16_HEADER_LENGTH, MODE4_HEADER_LENGTH, MODE4_SYNC_WORD,
};

#[test]
fn top_level_imports_compile() {
    // Just verify the types are usable from the crate root
    let _: fn(&[u8]) -> u16 = crc16;
    let _: fn(&[u8]) -> bool = is_mode4;
    assert_eq!(crc16(&[]), CRC16_INIT);
    assert_eq!(civil_to_epoch(1970, 1, 1, 0, 0, 0), 0);
    assert_eq!(format_ipv4(127, 0, 0, 1), "127.0.0.1");

    let _bo = TargetByteOrder::default();
    let _ip1 = Mode1Ip::Tcp0;
    let _ip4 = Mode4Ip::Gateway;
    assert_eq!(MODE1_CHANNEL_COUNT, 5);
    assert_eq!(MODE4_SYNC_WORD.len(), 4);

    // Parsing each mode from blank buffers of the right size compiles
    // and succeeds structurally
    let m1 = vec![0u8; MODE1_PACKET_LENGTH];
    let _: Result<Mode1Packet> = Mode1Packet::parse(&m1, TargetByteOrder::Little);

    let m4 = vec![0u8; MODE4_HEADER_LENGTH];
    let _: Result<Mode4Header> = Mode4Header::parse(&m4, TargetByteOrder::Little);

    let m16 = vec![0u8; MODE16_HEADER_LENGTH];
    let _: Result<Mode16Packet> = Mode16Packet::parse(&m16, TargetByteOrder::Little);

    // PalertError is accessible
    let _e: Option<PalertError> = None;
}
