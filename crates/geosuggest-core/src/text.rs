// crates/geosuggest-core/src/text.rs

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Kōchi` -> `Kochi`)
/// 2\) Normalize to lowercase
/// 3\) Trim surrounding whitespace
///
/// The implementation uses the `deunicode` crate to perform a best-effort
/// transliteration from Unicode to ASCII.
///
/// # Examples
///
/// ```rust
/// use geosuggest_core::text::fold_key;
///
/// assert_eq!(fold_key(" Kōchi "), "kochi");
/// assert_eq!(fold_key("ERNAKULAM"), "ernakulam");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s.trim()).to_lowercase()
}

/// Compares two strings for equality after Unicode folding and normalization.
///
/// ```rust
/// use geosuggest_core::text::equals_folded;
///
/// assert!(equals_folded("Kottayam", "KOTTAYAM"));
/// assert!(!equals_folded("Kochi", "Kollam"));
/// ```
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// Accent-insensitive + case-insensitive substring match.
///
/// An empty needle never matches; callers use this to test whether free text
/// names a region, and "" names nothing.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    let needle = fold_key(needle);
    !needle.is_empty() && fold_key(haystack).contains(&needle)
}

/// First comma-separated segment of a display string, trimmed.
///
/// Returns `None` when that segment is empty.
pub fn first_segment(s: &str) -> Option<&str> {
    s.split(',').next().map(str::trim).filter(|seg| !seg.is_empty())
}

/// Number of characters (not bytes) in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
