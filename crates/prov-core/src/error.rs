//! # Structured Error Hierarchy
//!
//! Error types for the foundational operations in `prov-core`.
//! Uses `thiserror` for ergonomic definitions with diagnostic context.

use thiserror::Error;

/// Errors from canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// A float was encountered. Amounts and indices must be strings or
    /// integers — floats do not canonicalize deterministically.
    #[error("float values are not canonicalizable: {0}")]
    FloatRejected(f64),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from parsing hex-encoded content digests.
#[derive(Error, Debug)]
pub enum DigestParseError {
    /// The hex string does not describe exactly 32 bytes.
    #[error("digest hex must be 64 chars, got {0}")]
    BadLength(usize),

    /// The string contains non-hex characters.
    #[error("invalid hex in digest: {0}")]
    BadHex(String),
}

/// Errors from parsing token identifiers.
#[derive(Error, Debug)]
pub enum TokenParseError {
    /// The token identifier string was empty.
    #[error("token identifier is empty")]
    Empty,

    /// A character outside the expected alphabet was encountered.
    #[error("invalid character {0:?} in token identifier")]
    BadDigit(char),

    /// The value does not fit in 256 bits.
    #[error("token identifier exceeds 256 bits")]
    Overflow,
}

/// Errors from constructing ledger references.
#[derive(Error, Debug)]
pub enum RecordError {
    /// The contract address is not a well-formed 0x-prefixed address.
    #[error("invalid contract address: {0}")]
    InvalidContractAddress(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_rejected_display() {
        let err = CanonicalizationError::FloatRejected(3.25);
        assert!(format!("{err}").contains("3.25"));
    }

    #[test]
    fn digest_bad_length_display() {
        let err = DigestParseError::BadLength(12);
        let msg = format!("{err}");
        assert!(msg.contains("64 chars"));
        assert!(msg.contains("12"));
    }

    #[test]
    fn token_overflow_display() {
        let err = TokenParseError::Overflow;
        assert!(format!("{err}").contains("256 bits"));
    }

    #[test]
    fn invalid_contract_address_display() {
        let err = RecordError::InvalidContractAddress("nope".to_string());
        assert!(format!("{err}").contains("nope"));
    }
}
