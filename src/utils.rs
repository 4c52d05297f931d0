//! Utility functions for string processing.

use unicode_normalization::UnicodeNormalization;

/// Normalize a string for search: lowercase, strip diacritics, and collapse whitespace.
///
/// This enables fuzzy matching between ASCII and accented versions:
/// - "café" → "cafe"
/// - "naïve" → "naive"
///
/// # Algorithm
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Filter out combining marks (category Mn = Mark, Nonspacing)
/// 3. Lowercase
/// 4. Collapse whitespace
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check if a character is a combining mark (diacritic).
///
/// Combining marks have Unicode category "Mn" (Mark, Nonspacing).
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Split a normalized query into whitespace-delimited tokens, dropping any
/// shorter than `min_len` characters.
pub fn tokenize(normalized: &str, min_len: usize) -> Vec<String> {
    normalized
        .split_whitespace()
        .filter(|t| t.chars().count() >= min_len)
        .map(str::to_string)
        .collect()
}
