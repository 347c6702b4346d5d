//! Dot-separated version comparison for ranking catalog entries.
//!
//! Browser versions in the catalog are plain strings like `"120.0.6099"`.
//! Only the first three segments (major, minor, patch) participate in the
//! comparison; anything past the patch segment is ignored. A segment that is
//! absent or not a number is treated as `0`, so `"1.2"` and `"1.2.0"` compare
//! equal. Comparison never fails.

use std::cmp::Ordering;

/// Compare two optional version strings segment by segment.
///
/// `None` behaves as the empty string (all segments zero).
pub fn compare(a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = segments(a.unwrap_or(""));
    let b = segments(b.unwrap_or(""));

    for (na, nb) in a.iter().zip(b.iter()) {
        match na.cmp(nb) {
            Ordering::Equal => continue,
            unequal => return unequal,
        }
    }
    Ordering::Equal
}

/// First three numeric segments, missing or unparsable ones as `0`.
fn segments(version: &str) -> [u64; 3] {
    let mut out = [0u64; 3];
    for (i, part) in version.split('.').take(3).enumerate() {
        out[i] = part.trim().parse().unwrap_or(0);
    }
    out
}
