//! Shared identifiers and reference-code helpers

/// Numeric identifier used by the backend for primary keys
pub type Id = i64;

/// Length of the random alphanumeric part of a reference code
pub const REFERENCE_SUFFIX_LEN: usize = 8;

/// Reference-code prefix for payment transactions (`DP5TG20VG1` style)
pub const PAYMENT_REFERENCE_PREFIX: &str = "DP";

/// Check that a code carries the expected prefix followed by the fixed-width
/// uppercase alphanumeric suffix the backend generates.
pub fn is_valid_reference(code: &str, prefix: &str) -> bool {
    if code.len() != prefix.len() + REFERENCE_SUFFIX_LEN {
        return false;
    }
    if !code.starts_with(prefix) {
        return false;
    }
    code[prefix.len()..]
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}
