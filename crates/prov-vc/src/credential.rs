//! # Verifiable Credential Structure
//!
//! The W3C VC Data Model envelope. The envelope structure is rigid while
//! `credential_subject` is intentionally extensible. JSON polymorphism —
//! single-vs-array `@context`, `type`, `proof`, and string-vs-object
//! `issuer` — is handled with untagged enums at the serde level.
//!
//! ## Security Invariant
//!
//! The proof signing input is the JCS-canonicalized credential body with
//! the `proof` field removed, produced via
//! [`CanonicalBytes`](prov_core::CanonicalBytes) — never raw
//! `serde_json::to_vec()`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use prov_core::CanonicalBytes;

use crate::error::VcError;
use crate::proof::Proof;

/// JSON-LD `@context` value — either a single string or an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    /// Single context URI string.
    Single(String),
    /// Array of context URI strings or objects.
    Array(Vec<serde_json::Value>),
}

impl Default for ContextValue {
    fn default() -> Self {
        Self::Array(vec![serde_json::Value::String(
            "https://www.w3.org/2018/credentials/v1".to_string(),
        )])
    }
}

/// Credential `type` value — either a single string or an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CredentialTypeValue {
    /// Single type string.
    Single(String),
    /// Array of type strings.
    Array(Vec<String>),
}

impl CredentialTypeValue {
    /// Check whether `"VerifiableCredential"` is included in the type.
    pub fn contains_vc_type(&self) -> bool {
        match self {
            CredentialTypeValue::Single(s) => s == "VerifiableCredential",
            CredentialTypeValue::Array(arr) => arr.iter().any(|s| s == "VerifiableCredential"),
        }
    }
}

/// Credential `issuer` value — a DID string or an object carrying `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IssuerValue {
    /// Bare issuer identifier string.
    Id(String),
    /// Object form, e.g. `{"id": "did:…", "name": "…"}`.
    Object {
        /// The issuer identifier.
        id: String,
        /// Remaining issuer metadata, preserved but not interpreted.
        #[serde(flatten)]
        rest: serde_json::Map<String, serde_json::Value>,
    },
}

impl IssuerValue {
    /// The issuer identifier, whichever form it was given in.
    pub fn id(&self) -> &str {
        match self {
            IssuerValue::Id(s) => s,
            IssuerValue::Object { id, .. } => id,
        }
    }
}

/// The `credentialStatus` entry pointing into a status list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialStatus {
    /// Status entry identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Status entry type (e.g. `"BitstringStatusListEntry"`). Not
    /// interpreted — the checker is selected by the caller.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub status_type: Option<String>,

    /// Index of this credential in the status list.
    #[serde(
        rename = "statusListIndex",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub status_list_index: Option<IndexValue>,

    /// URI of the status-list credential.
    #[serde(
        rename = "statusListCredential",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub status_list_credential: Option<String>,
}

/// A status-list index — issuers emit both string and number forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexValue {
    /// Numeric index.
    Number(u64),
    /// Stringified index.
    Text(String),
}

impl IndexValue {
    /// The index as a usize, if it parses.
    pub fn as_usize(&self) -> Option<usize> {
        match self {
            IndexValue::Number(n) => usize::try_from(*n).ok(),
            IndexValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Proof value — single proof, array of proofs, or absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProofValue {
    /// A single proof object.
    Single(Box<Proof>),
    /// An array of proof objects.
    Array(Vec<Proof>),
}

impl Default for ProofValue {
    fn default() -> Self {
        Self::Array(Vec::new())
    }
}

impl ProofValue {
    /// Returns `true` if there are no proofs.
    pub fn is_empty(&self) -> bool {
        match self {
            ProofValue::Single(_) => false,
            ProofValue::Array(arr) => arr.is_empty(),
        }
    }

    /// Normalize to a list of proof references.
    pub fn as_list(&self) -> Vec<&Proof> {
        match self {
            ProofValue::Single(p) => vec![p.as_ref()],
            ProofValue::Array(arr) => arr.iter().collect(),
        }
    }

    /// Add a proof, converting Single to Array if needed.
    pub fn push(&mut self, proof: Proof) {
        match self {
            ProofValue::Single(existing) => {
                let prev = existing.clone();
                *self = ProofValue::Array(vec![*prev, proof]);
            }
            ProofValue::Array(arr) => arr.push(proof),
        }
    }
}

/// A W3C Verifiable Credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiableCredential {
    /// JSON-LD context URIs.
    #[serde(rename = "@context", default)]
    pub context: ContextValue,

    /// Credential identifier (URN or DID).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Credential type(s). MUST include `"VerifiableCredential"`.
    #[serde(rename = "type")]
    pub credential_type: CredentialTypeValue,

    /// The credential issuer.
    pub issuer: IssuerValue,

    /// When the credential was issued (UTC).
    #[serde(
        rename = "issuanceDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub issuance_date: Option<DateTime<Utc>>,

    /// Optional expiration date (UTC).
    #[serde(
        rename = "expirationDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_date: Option<DateTime<Utc>>,

    /// The credential subject — intentionally extensible.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: serde_json::Value,

    /// Optional status-list entry for revocation checking.
    #[serde(
        rename = "credentialStatus",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub credential_status: Option<CredentialStatus>,

    /// Cryptographic proofs attached to this credential.
    #[serde(default, skip_serializing_if = "ProofValue::is_empty")]
    pub proof: ProofValue,
}

impl VerifiableCredential {
    /// Decode a credential from raw JSON.
    pub fn from_value(value: serde_json::Value) -> Result<Self, VcError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Compute the canonical signing input: the credential with the
    /// `proof` field removed, JCS-canonicalized.
    pub fn signing_input(&self) -> Result<CanonicalBytes, VcError> {
        let mut val = serde_json::to_value(self)?;
        if let Some(obj) = val.as_object_mut() {
            obj.remove("proof");
        }
        Ok(CanonicalBytes::from_value(val)?)
    }
}
