//! Key normalization and bucket partitioning.
//!
//! The same [`normalize`] function is applied to names at load time and to queries at
//! search time. Any divergence between the two silently breaks matching, so nothing else
//! in the crate canonicalizes keys.

use std::fmt::Write as _;

/// Canonicalize a display name into a storage and comparison key.
///
/// ASCII letters and digits are lower-cased; every other byte of the UTF-8 encoding is
/// escaped as `_` followed by two lowercase hex digits:
/// - `DarcyKinematic` → `darcykinematic`
/// - `distance_max` → `distance_5fmax`
/// - `Deprecated List` → `deprecated_20list`
///
/// Normalization is prefix-preserving, so prefix matching on keys agrees with prefix
/// matching on the original text.
pub fn normalize(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    for byte in text.bytes() {
        if byte.is_ascii_alphanumeric() {
            key.push(char::from(byte.to_ascii_lowercase()));
        } else {
            // Writing to a String cannot fail
            let _ = write!(key, "_{:02x}", byte);
        }
    }
    key
}

/// Length in bytes of the normalized unit starting at `pos`.
///
/// A unit is one alphanumeric char or one complete `_xx` escape. A truncated escape at the
/// end of the key counts as the remainder of the key.
fn unit_len(key: &[u8], pos: usize) -> usize {
    if key[pos] == b'_' {
        3.min(key.len() - pos)
    } else {
        1
    }
}

/// Deterministic partition function mapping a normalized key to its bucket key.
///
/// The bucket key is the first `width` units of the normalized key, which makes it a prefix
/// of every key stored in the bucket. Keys shorter than `width` units are their own bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionRule {
    width: usize,
}

impl Default for PartitionRule {
    fn default() -> Self {
        Self { width: 1 }
    }
}

impl PartitionRule {
    /// Create a rule keeping `width` leading units. Returns `None` for a zero width.
    pub const fn leading_units(width: usize) -> Option<Self> {
        if width == 0 {
            None
        } else {
            Some(Self { width })
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    /// The bucket key for an already normalized key.
    ///
    /// Normalized keys are pure ASCII. Other text is cut at the nearest char boundary at or
    /// below the unit count rather than mid-character.
    pub fn bucket_key<'a>(&self, normalized_key: &'a str) -> &'a str {
        let bytes = normalized_key.as_bytes();
        let mut end = 0;
        for _ in 0..self.width {
            if end >= bytes.len() {
                break;
            }
            end += unit_len(bytes, end);
        }
        while !normalized_key.is_char_boundary(end) {
            end -= 1;
        }
        &normalized_key[..end]
    }

    /// Whether a bucket can hold keys starting with `normalized_query`.
    ///
    /// True when the bucket key is a prefix of the query (the bucket is the query's own
    /// partition) or when the query is a prefix of the bucket key (the query is shorter than
    /// the partition width and spans several buckets).
    pub fn may_contain(bucket_key: &str, normalized_query: &str) -> bool {
        normalized_query.starts_with(bucket_key) || bucket_key.starts_with(normalized_query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("DarcyKinematic", "darcykinematic")]
    #[case("distance_max", "distance_5fmax")]
    #[case("Deprecated List", "deprecated_20list")]
    #[case("dPsiM_dW", "dpsim_5fdw")]
    #[case("distance3DTo", "distance3dto")]
    #[case("operator+", "operator_2b")]
    #[case("~Date", "_7edate")]
    #[case("", "")]
    fn test_normalize(#[case] input: &str, #[case] expected: &str) {
        check!(normalize(input) == expected);
    }

    #[test]
    fn test_normalize_non_ascii_escapes_each_byte() {
        // 'é' is 0xC3 0xA9 in UTF-8
        check!(normalize("é") == "_c3_a9");
    }

    #[rstest]
    #[case("distance", "distance_max")]
    #[case("deprecated ", "Deprecated List")]
    #[case("D", "dxdt")]
    fn test_normalize_preserves_prefixes(#[case] prefix: &str, #[case] full: &str) {
        check!(normalize(full).starts_with(&normalize(prefix)));
    }

    #[rstest]
    #[case(1, "darcy", "d")]
    #[case(2, "darcy", "da")]
    #[case(1, "_7edate", "_7e")]
    #[case(2, "_7edate", "_7ed")]
    #[case(3, "d", "d")]
    #[case(1, "", "")]
    #[case(1, "_7", "_7")]
    fn test_bucket_key(#[case] width: usize, #[case] key: &str, #[case] expected: &str) {
        let rule = PartitionRule::leading_units(width).unwrap();
        check!(rule.bucket_key(key) == expected);
    }

    #[rstest]
    #[case(1, "é", "")]
    #[case(2, "aé", "a")]
    #[case(1, "_aé", "_a")]
    fn test_bucket_key_non_normalized_input(
        #[case] width: usize,
        #[case] key: &str,
        #[case] expected: &str,
    ) {
        let rule = PartitionRule::leading_units(width).unwrap();
        check!(rule.bucket_key(key) == expected);
    }

    #[test]
    fn test_zero_width_rejected() {
        check!(PartitionRule::leading_units(0).is_none());
        check!(PartitionRule::default().width() == 1);
    }

    #[rstest]
    #[case("d", "date", true)]
    #[case("da", "d", true)]
    #[case("de", "da", false)]
    #[case("d", "zzz", false)]
    fn test_may_contain(#[case] bucket: &str, #[case] query: &str, #[case] expected: bool) {
        check!(PartitionRule::may_contain(bucket, query) == expected);
    }
}
