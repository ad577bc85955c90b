//! # Proof Types for Verifiable Credentials
//!
//! The cryptographic proof structure attached to credentials. Proof values
//! are hex-encoded Ed25519 signatures (64 bytes → 128 hex chars) computed
//! over the JCS-canonicalized credential body with the `proof` field
//! removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The type of cryptographic proof attached to a credential.
///
/// Only Ed25519 data-integrity proofs are verifiable; anything else
/// deserializes to [`ProofType::Unsupported`] (preserving the original
/// type name) and fails verification explicitly rather than silently
/// passing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofType {
    /// Ed25519 digital signature per the W3C VC Data Integrity spec.
    Ed25519Signature2020,

    /// Any proof type this verifier does not implement.
    Unsupported(String),
}

impl ProofType {
    /// Returns `true` if this is an Ed25519-based proof type.
    pub fn is_ed25519(&self) -> bool {
        matches!(self, ProofType::Ed25519Signature2020)
    }

    /// The proof type's wire name.
    pub fn as_str(&self) -> &str {
        match self {
            ProofType::Ed25519Signature2020 => "Ed25519Signature2020",
            ProofType::Unsupported(name) => name,
        }
    }
}

impl std::fmt::Display for ProofType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProofType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProofType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(match name.as_str() {
            "Ed25519Signature2020" => ProofType::Ed25519Signature2020,
            _ => ProofType::Unsupported(name),
        })
    }
}

/// The purpose of a cryptographic proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProofPurpose {
    /// The issuer asserts the credential claims are true.
    AssertionMethod,
    /// Authentication of the credential holder.
    Authentication,
}

/// A cryptographic proof on a Verifiable Credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proof {
    /// The proof type.
    #[serde(rename = "type")]
    pub proof_type: ProofType,

    /// When the proof was created (UTC).
    pub created: DateTime<Utc>,

    /// The verification method — a DID URL identifying the signing key.
    #[serde(rename = "verificationMethod")]
    pub verification_method: String,

    /// The purpose of this proof.
    #[serde(rename = "proofPurpose")]
    pub proof_purpose: ProofPurpose,

    /// The proof value — hex-encoded signature bytes (128 hex chars for
    /// Ed25519).
    #[serde(rename = "proofValue")]
    pub proof_value: String,
}

impl Proof {
    /// Create a new Ed25519Signature2020 proof with the current timestamp.
    pub fn new_ed25519(verification_method: String, proof_value: String) -> Self {
        Self {
            proof_type: ProofType::Ed25519Signature2020,
            created: Utc::now(),
            verification_method,
            proof_purpose: ProofPurpose::AssertionMethod,
            proof_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proof_type_serde_roundtrip() {
        let json = serde_json::to_string(&ProofType::Ed25519Signature2020).unwrap();
        assert_eq!(json, r#""Ed25519Signature2020""#);
        let back: ProofType = serde_json::from_str(&json).unwrap();
        assert!(back.is_ed25519());
    }

    #[test]
    fn unknown_proof_type_becomes_unsupported() {
        let back: ProofType = serde_json::from_str(r#""BbsBlsSignature2020""#).unwrap();
        assert!(matches!(back, ProofType::Unsupported(_)));
        assert_eq!(back.as_str(), "BbsBlsSignature2020");
        assert!(!back.is_ed25519());
    }

    #[test]
    fn unsupported_proof_type_roundtrips_wire_name() {
        let unsupported = ProofType::Unsupported("BbsBlsSignature2020".to_string());
        let json = serde_json::to_string(&unsupported).unwrap();
        assert_eq!(json, r#""BbsBlsSignature2020""#);
    }

    #[test]
    fn proof_purpose_serde_camel_case() {
        let json = serde_json::to_string(&ProofPurpose::AssertionMethod).unwrap();
        assert_eq!(json, r#""assertionMethod""#);
    }

    #[test]
    fn proof_json_field_names_match_w3c() {
        let proof = Proof::new_ed25519("did:key:z6MkTest#key-1".to_string(), "ab".repeat(64));
        let val = serde_json::to_value(&proof).unwrap();
        assert!(val.get("type").is_some());
        assert!(val.get("created").is_some());
        assert!(val.get("verificationMethod").is_some());
        assert!(val.get("proofPurpose").is_some());
        assert!(val.get("proofValue").is_some());
        assert!(val.get("proof_type").is_none());
        assert!(val.get("verification_method").is_none());
    }

    #[test]
    fn proof_deserializes_from_w3c_json() {
        let json_str = r#"{
            "type": "Ed25519Signature2020",
            "created": "2026-01-15T12:00:00Z",
            "verificationMethod": "did:key:z6MkTest#key-1",
            "proofPurpose": "assertionMethod",
            "proofValue": "deadbeef"
        }"#;
        let proof: Proof = serde_json::from_str(json_str).unwrap();
        assert_eq!(proof.proof_type, ProofType::Ed25519Signature2020);
        assert_eq!(proof.proof_purpose, ProofPurpose::AssertionMethod);
    }
}
