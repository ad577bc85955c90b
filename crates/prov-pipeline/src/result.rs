//! # Verification Results
//!
//! [`VerificationResult`] is the pipeline's verdict: a value, not an error.
//! `reason` is present exactly when `ok` is false, and only the failure
//! branch that terminated the pipeline populates it — no two checks ever
//! produce conflicting partial results.
//!
//! The JSON shape uses camelCase field names (`computedHash`, `tokenId`,
//! `schemaErrors`) to match the service and CLI output contract.

use serde::{Deserialize, Serialize};

use prov_core::{ContentDigest, TokenRef};
use prov_schema::SchemaViolation;

/// The canonical failure reason strings.
pub mod reason {
    /// The on-chain record is revoked.
    pub const TOKEN_REVOKED: &str = "Token revoked";
    /// The computed content digest does not match the on-chain commitment.
    pub const HASH_MISMATCH: &str = "Hash mismatch";
    /// The metadata document failed schema validation.
    pub const BAD_METADATA_SCHEMA: &str = "Bad metadata schema";
    /// The metadata carries no author signature.
    pub const MISSING_AUTHOR_SIGNATURE: &str = "Missing author signature";
    /// The metadata carries neither an embedded key nor an author DID.
    pub const NO_DID_OR_PUBKEY: &str = "No DID or pubkey provided";
    /// The author's detached signature did not verify.
    pub const AUTHOR_SIGNATURE_INVALID: &str = "Author signature invalid";
    /// The credential's status-list entry is revoked.
    pub const VC_REVOKED: &str = "VC revoked";
    /// The credential's issuer is not on the allow-list.
    pub const VC_ISSUER_NOT_ALLOWED: &str = "VC issuer not allowed";

    /// The credential could not be fetched or verified.
    pub fn vc_invalid(detail: impl std::fmt::Display) -> String {
        format!("VC invalid: {detail}")
    }
}

/// How the author signature was established on a successful verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthorVerification {
    /// The Ed25519 detached signature verified against the embedded key.
    Verified,
    /// Only a DID was present; no cryptographic check was possible. The
    /// gap is surfaced to the caller, not silently treated as verified.
    DidOnly,
}

/// The pipeline's verdict for one verification call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Whether the content verified.
    pub ok: bool,

    /// The failure reason — present iff `ok` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// The computed BLAKE3 digest (`0x`-prefixed hex) — present on success.
    #[serde(
        rename = "computedHash",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub computed_hash: Option<String>,

    /// The verified token identifier — present on success.
    #[serde(rename = "tokenId", default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,

    /// The registry contract address — present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<String>,

    /// How the author signature was established — present on success.
    #[serde(
        rename = "authorVerification",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub author_verification: Option<AuthorVerification>,

    /// Structured schema violations — present on `"Bad metadata schema"`.
    #[serde(
        rename = "schemaErrors",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_errors: Option<Vec<SchemaViolation>>,
}

impl VerificationResult {
    /// A successful verdict.
    pub fn success(
        computed: &ContentDigest,
        token: &TokenRef,
        author: AuthorVerification,
    ) -> Self {
        Self {
            ok: true,
            reason: None,
            computed_hash: Some(computed.to_prefixed_hex()),
            token_id: Some(token.token_id.to_string()),
            contract: Some(token.contract.clone()),
            author_verification: Some(author),
            schema_errors: None,
        }
    }

    /// A failed verdict with the given reason.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
            computed_hash: None,
            token_id: None,
            contract: None,
            author_verification: None,
            schema_errors: None,
        }
    }

    /// A failed verdict for schema validation, carrying the violations.
    pub fn schema_failure(violations: Vec<SchemaViolation>) -> Self {
        Self {
            schema_errors: Some(violations),
            ..Self::failure(reason::BAD_METADATA_SCHEMA)
        }
    }
}
