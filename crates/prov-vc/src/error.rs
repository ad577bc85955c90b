//! # Credential Error Types

use thiserror::Error;

/// Errors from credential verification and status-list checking.
#[derive(Error, Debug)]
pub enum VcError {
    /// The document is not a Verifiable Credential (`type` lacks
    /// `"VerifiableCredential"`).
    #[error("document type does not include VerifiableCredential")]
    MissingType,

    /// The credential has no issuer identifier.
    #[error("credential has no issuer identifier")]
    MissingIssuer,

    /// The credential has no proofs to verify.
    #[error("credential has no proofs")]
    NoProofs,

    /// The credential is past its expiration date.
    #[error("credential expired at {0}")]
    Expired(chrono::DateTime<chrono::Utc>),

    /// The proof has an unsupported type for verification.
    #[error("unsupported proof type: {0}")]
    UnsupportedProofType(String),

    /// The proof value has invalid encoding or length.
    #[error("invalid proof value: {0}")]
    InvalidProofValue(String),

    /// The verification method could not be resolved to a key.
    #[error("key resolution failed: {0}")]
    Resolver(String),

    /// Cryptographic proof verification failed.
    #[error("proof verification failed: {0}")]
    VerificationFailed(String),

    /// Canonicalization of the credential body failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] prov_core::CanonicalizationError),

    /// The credential document could not be decoded.
    #[error("credential JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The status list could not be interpreted.
    #[error("status list error: {0}")]
    StatusList(String),
}
