//! Dotted-decimal rendering of IPv4 octets from Palert headers.

/// Render four octets as `"a.b.c.d"`.
///
/// No leading zeros, no validation beyond the `u8` domain, no failure mode.
pub fn format_ipv4(a: u8, b: u8, c: u8, d: u8) -> String {
    format!("{a}.{b}.{c}.{d}")
}
