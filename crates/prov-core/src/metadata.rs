//! # Content Metadata Model
//!
//! The off-chain metadata document referenced by a provenance record's
//! `metadata_uri`. The pipeline borrows one of these per verification call;
//! nothing here is retained across calls.
//!
//! The document is validated as raw JSON against the metadata schema
//! *before* being decoded into this typed model, so schema violations are
//! reported with their original field paths. Unknown fields (titles,
//! descriptions, media attributes) are permitted and ignored here.

use serde::{Deserialize, Serialize};

/// The author-signature payload separator.
///
/// The signed payload is the exact byte concatenation
/// `{contentHash}||{createdAt}` — both values in their textual form as they
/// appear in the metadata document.
const PAYLOAD_SEPARATOR: &str = "||";

/// A single detached-signature entry in the metadata `signatures` sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEntry {
    /// Base64-encoded Ed25519 detached signature (64 bytes decoded).
    pub sig: String,
    /// Base64-encoded Ed25519 public key (32 bytes decoded), when the
    /// author embeds the key directly.
    #[serde(rename = "pub", default, skip_serializing_if = "Option::is_none")]
    pub pub_key: Option<String>,
}

/// Pointer to an optional third-party Verifiable Credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPointer {
    /// URI of the credential document.
    pub uri: String,
    /// URI of the credential's status-list document, optionally carrying a
    /// `#fragment` (stripped before fetching).
    #[serde(rename = "statusList", default, skip_serializing_if = "Option::is_none")]
    pub status_list: Option<String>,
}

/// The metadata `createdAt` value — a timestamp string or an epoch number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreatedAt {
    /// Textual timestamp (e.g. RFC 3339).
    Text(String),
    /// Numeric epoch timestamp.
    Epoch(i64),
}

impl std::fmt::Display for CreatedAt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreatedAt::Text(s) => f.write_str(s),
            CreatedAt::Epoch(n) => write!(f, "{n}"),
        }
    }
}

/// The off-chain metadata document for a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMetadata {
    /// Hex digest of the content, as declared by the author. Feeds the
    /// author-signature payload; the on-chain commitment is checked
    /// separately against the recomputed digest.
    #[serde(rename = "contentHash")]
    pub content_hash: String,

    /// When the content was created, as declared by the author.
    #[serde(rename = "createdAt")]
    pub created_at: CreatedAt,

    /// Ordered author signatures. The first entry is authoritative.
    #[serde(default)]
    pub signatures: Vec<SignatureEntry>,

    /// The author's DID, when no public key is embedded.
    #[serde(rename = "authorDID", default, skip_serializing_if = "Option::is_none")]
    pub author_did: Option<String>,

    /// Optional third-party credential attesting to the content.
    #[serde(
        rename = "verifiableCredential",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub verifiable_credential: Option<CredentialPointer>,
}

impl ContentMetadata {
    /// Decode a metadata document from raw JSON.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Construct the deterministic author-signature payload:
    /// `{contentHash}||{createdAt}`.
    pub fn signing_payload(&self) -> Vec<u8> {
        format!("{}{}{}", self.content_hash, PAYLOAD_SEPARATOR, self.created_at).into_bytes()
    }
}
