//! Integer helpers
//!
//! Strict parsing of stored field values and overflow-checked addition.

/// Parse a base-10 signed 64-bit integer literal
///
/// Accepts an optional leading sign followed by ASCII digits. Anything else
/// (surrounding whitespace, decimal points, exponents, empty input, values
/// outside the `i64` range) is rejected.
pub fn parse_i64(text: &str) -> Option<i64> {
    text.parse::<i64>().ok()
}

/// Add `delta` to `current`, or `None` if the sum leaves the `i64` range
///
/// The range is checked on the operands before the addition happens, so the
/// sum is never computed when it would wrap.
pub fn add_checked(current: i64, delta: i64) -> Option<i64> {
    if delta > 0 && current > i64::MAX - delta {
        return None;
    }
    if delta < 0 && current < i64::MIN - delta {
        return None;
    }
    Some(current + delta)
}
