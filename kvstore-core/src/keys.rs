//! Key and range-end byte helpers
//!
//! Range ends follow the store's conventions: an empty range end addresses a
//! single key, `[0x00]` addresses every key greater than or equal to the start
//! key, and anything else is the exclusive upper bound of `[key, range_end)`.

/// The zero byte, used both as the lowest key and as the "no upper bound"
/// range end.
pub const ZERO_KEY: &[u8] = &[0];

/// Range end covering every key that starts with `prefix`.
///
/// Trailing `0xff` bytes cannot be incremented, so they are dropped before the
/// last byte is bumped. A prefix made only of `0xff` has no finite upper bound
/// and maps to `[0x00]`.
pub fn prefix_range_end(prefix: &[u8]) -> Vec<u8> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < 0xff {
            end.push(last + 1);
            return end;
        }
    }
    ZERO_KEY.to_vec()
}

/// Byte-wise substring test.
pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}

/// Render bytes as lowercase hex pairs separated by single spaces.
pub fn spaced_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
