//! Local BIN format check, run before any request is made.

use crate::errors::LookupError;
use regex::Regex;
use std::sync::LazyLock;

/// Human-readable description of the accepted BIN format.
pub const BIN_FORMAT_MESSAGE: &str = "BIN must be fully numerical, first digit must be in range of 1-9, and the next digits must be 3-15 characters long.";

// `[0-9]` rather than `\d`: the regex crate's `\d` matches all Unicode digits.
static BIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[1-9][0-9]{3,15}$").unwrap());

/// Returns true if `bin` is 4-16 ASCII digits with a non-zero first digit.
pub fn is_valid_bin(bin: &str) -> bool {
    BIN_RE.is_match(bin)
}

/// Log-safe form of `bin`: the first 6 characters and the total length.
///
/// A 16-digit input may be a full card number, so nothing past the issuer
/// prefix is ever written to logs or error messages.
pub fn mask_bin(bin: &str) -> String {
    let prefix: String = bin.chars().take(6).collect();
    format!("{}*** (len {})", prefix, bin.chars().count())
}

/// Validate `bin`, returning `LookupError::Validation` on failure.
pub fn validate_bin(bin: &str) -> Result<(), LookupError> {
    if is_valid_bin(bin) {
        Ok(())
    } else {
        tracing::warn!("Rejected malformed BIN: {:?}", mask_bin(bin));
        Err(LookupError::Validation {
            bin: bin.to_string(),
            message: BIN_FORMAT_MESSAGE,
        })
    }
}
