//! Log sanitization utilities
//!
//! Response bodies can carry record contents (TXT verification strings,
//! DKIM keys) and verbose error dumps; logs only ever see a bounded prefix.

/// Maximum number of bytes of a body to include in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Truncate a string for safe logging.
///
/// Strings within the limit come back unchanged; longer ones are cut at a
/// UTF-8 boundary with a suffix noting the original length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }

    // str::floor_char_boundary is unstable below 1.91; walk back by hand.
    let mut cut = TRUNCATE_LIMIT;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }

    format!(
        "{}... [truncated, total {} bytes]",
        &s[..cut],
        s.len()
    )
}
