//! Calendar-time reconstruction for Palert headers.
//!
//! Palert headers carry broken-down UTC date/time fields. [`civil_to_epoch`]
//! turns them into Unix epoch seconds with the classic civil-calendar trick:
//! February is treated as month 14 of the previous year so the leap day
//! lands at the end of the counting year.

/// Days between the formula's day-count origin and 1970-01-01.
const EPOCH_OFFSET_DAYS: i64 = 719_499;

/// Convert a broken-down UTC time to Unix epoch seconds.
///
/// All divisions are truncating integer divisions; the formula only holds
/// for dates in the civil (Gregorian) calendar. Out-of-range field values
/// are not validated — the result is whatever the arithmetic yields, which
/// matches the hardware's own clock encoding.
pub fn civil_to_epoch(year: i64, mon: i64, day: i64, hour: i64, min: i64, sec: i64) -> i64 {
    let (year, mon) = if mon - 2 <= 0 {
        // Puts Feb. last since it has leap day
        (year - 1, mon + 10)
    } else {
        (year, mon - 2)
    };

    ((((year / 4 - year / 100 + year / 400 + 367 * mon / 12 + day) + year * 365
        - EPOCH_OFFSET_DAYS)
        * 24
        + hour)
        * 60
        + min)
        * 60
        + sec
}

/// Convert the 10 ms sub-second header field to fractional seconds.
///
/// Replicates the original shift-add-then-divide arithmetic
/// (`tenmsec * 8 + tenmsec * 2`, then a float divide by 1000) so the
/// rounding behavior is bit-identical to the hardware tooling.
pub fn tenmsec_fraction(tenmsec: u8) -> f64 {
    let t = tenmsec as i64;
    ((t << 3) + (t << 1)) as f64 / 1000.0
}
