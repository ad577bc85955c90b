//! # Content Digests — BLAKE3-256
//!
//! Defines [`ContentDigest`] and [`blake3_digest()`], the digest computation
//! path that binds off-chain content bytes to on-chain records.
//!
//! Unlike credential proof input (which flows through
//! [`CanonicalBytes`](crate::CanonicalBytes)), content digests are computed
//! over the **raw file bytes** exactly as uploaded — the registry commits to
//! the content itself, not to any re-serialization of it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DigestParseError;

/// A BLAKE3-256 content digest (32 bytes).
///
/// Renders as `0x`-prefixed lowercase hex, matching the registry contract's
/// `bytes32 contentHash` representation. Parsing accepts mixed case and an
/// optional `0x` prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Create a digest from raw 32 bytes.
    ///
    /// Prefer [`blake3_digest()`] for computing digests from content.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the raw 32-byte digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the digest as a lowercase hex string without prefix.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Render the digest as a `0x`-prefixed lowercase hex string.
    pub fn to_prefixed_hex(&self) -> String {
        format!("0x{}", self.to_hex())
    }

    /// Parse a digest from a hex string.
    ///
    /// Accepts mixed case and an optional `0x`/`0X` prefix, so comparisons
    /// against chain-sourced hex are case-insensitive by construction.
    pub fn from_hex(hex: &str) -> Result<Self, DigestParseError> {
        let hex = hex.trim();
        let hex = hex
            .strip_prefix("0x")
            .or_else(|| hex.strip_prefix("0X"))
            .unwrap_or(hex);
        if hex.len() != 64 {
            return Err(DigestParseError::BadLength(hex.len()));
        }
        let bytes = hex_to_bytes(hex)?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl std::fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.iter().take(4).map(|b| format!("{b:02x}")).collect();
        write!(f, "ContentDigest({prefix}...)")
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_prefixed_hex())
    }
}

impl Serialize for ContentDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_prefixed_hex())
    }
}

impl<'de> Deserialize<'de> for ContentDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

/// Compute the BLAKE3-256 digest of raw content bytes.
///
/// Deterministic: the same bytes always produce the same digest. This is
/// the central trust anchor — the on-chain record commits to exactly this
/// value.
pub fn blake3_digest(content: &[u8]) -> ContentDigest {
    ContentDigest(*blake3::hash(content).as_bytes())
}

// ---------------------------------------------------------------------------
// Hex utilities (no external hex crate dependency)
// ---------------------------------------------------------------------------

fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, DigestParseError> {
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| DigestParseError::BadHex(hex[i..i + 2].to_string()))
        })
        .collect()
}
