//! Unique sheet-name abbreviation
//!
//! Excel caps sheet names at 31 characters. Long table names are truncated
//! and post-fixed with `_<index>` until the result is unique within the
//! workbook, which keeps the index sheet mapping reversible.

use std::collections::HashSet;

use anyhow::{Result, bail};

/// Excel's hard limit on sheet name length, in characters.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Bound on the uniqueness search before giving up.
const MAX_UNIQUE_ATTEMPTS: usize = 9999;

/// Truncate `long_name` and post-fix `_<index>` so the total length stays
/// within `max_length` characters.
fn truncated_postfixed_name(long_name: &str, max_length: usize, index: usize) -> String {
    let post_fix = format!("_{}", index);
    let keep = max_length.saturating_sub(post_fix.chars().count());
    let mut name: String = long_name.chars().take(keep).collect();
    name.push_str(&post_fix);
    name
}

/// Create a unique, abbreviated name that is not a member of `existing`.
///
/// A name that already fits is used as-is unless taken; collisions are
/// resolved by post-fixing `_<index>` with an increasing index, each time
/// re-truncating the original name to fit. Names over `max_length`
/// characters start at index 0. Truncation counts characters, not bytes,
/// so multi-byte names never split a code point.
///
/// Fails once the attempt bound is exhausted rather than returning a
/// colliding name.
pub fn unique_abbreviated_name(
    long_name: &str,
    max_length: usize,
    existing: &HashSet<String>,
) -> Result<String> {
    let mut name = if long_name.chars().count() > max_length {
        truncated_postfixed_name(long_name, max_length, 0)
    } else {
        long_name.to_string()
    };

    if !existing.contains(&name) {
        return Ok(name);
    }

    for index in 1..MAX_UNIQUE_ATTEMPTS {
        name = truncated_postfixed_name(long_name, max_length, index);
        if !existing.contains(&name) {
            return Ok(name);
        }
    }

    bail!(
        "No unique sheet name for '{}' within {} attempts",
        long_name,
        MAX_UNIQUE_ATTEMPTS
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_short_name_unchanged() {
        let name = unique_abbreviated_name("inventory", 31, &HashSet::new()).unwrap();
        assert_eq!(name, "inventory");
    }

    #[test]
    fn test_long_name_truncated_with_zero_suffix() {
        let long = "x".repeat(35);
        let name = unique_abbreviated_name(&long, 31, &HashSet::new()).unwrap();
        assert_eq!(name.chars().count(), 31);
        assert_eq!(name, format!("{}_0", "x".repeat(29)));
    }

    #[test]
    fn test_short_name_collision_starts_at_one() {
        let name = unique_abbreviated_name("abc", 10, &set(&["abc"])).unwrap();
        assert_eq!(name, "abc_1");
    }

    #[test]
    fn test_long_name_collision_increments_suffix() {
        let long = "x".repeat(35);
        let taken = set(&[&format!("{}_0", "x".repeat(29))]);
        let name = unique_abbreviated_name(&long, 31, &taken).unwrap();
        assert_eq!(name, format!("{}_1", "x".repeat(29)));
        assert_eq!(name.chars().count(), 31);
    }

    #[test]
    fn test_sequence_stays_unique() {
        let long = "x".repeat(40);
        let mut used = HashSet::new();
        let mut produced = Vec::new();
        for _ in 0..20 {
            let name = unique_abbreviated_name(&long, 31, &used).unwrap();
            assert!(!produced.contains(&name));
            assert!(name.chars().count() <= 31);
            used.insert(name.clone());
            produced.push(name);
        }
    }

    #[test]
    fn test_multibyte_names_truncate_on_char_boundary() {
        let long = "ü".repeat(35);
        let name = unique_abbreviated_name(&long, 31, &HashSet::new()).unwrap();
        assert_eq!(name.chars().count(), 31);
        assert_eq!(name, format!("{}_0", "ü".repeat(29)));
    }

    #[test]
    fn test_exhaustion_is_an_error() {
        let mut used = set(&["t"]);
        for index in 1..MAX_UNIQUE_ATTEMPTS {
            used.insert(format!("t_{}", index));
        }
        let err = unique_abbreviated_name("t", 31, &used).unwrap_err();
        assert!(err.to_string().contains("No unique sheet name"));
    }
}
