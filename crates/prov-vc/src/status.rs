//! # Status-List Revocation Checking
//!
//! [`RevocationChecker`] is the capability boundary for credential
//! revocation: given a credential and a fetched status-list document,
//! decide whether the credential's entry is revoked.
//!
//! [`BitstringStatusList`] implements the bitstring encoding: the status
//! document carries `credentialSubject.encodedList`, a base64 string that
//! gunzips to a bitstring read MSB-first; the credential's
//! `credentialStatus.statusListIndex` selects the bit.
//!
//! Missing pieces — no `credentialStatus`, no index, no `encodedList`,
//! an index past the end of the list — are errors, not silent passes.

use std::io::Read;

use base64::engine::general_purpose::{STANDARD as BASE64_STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::Value;

use crate::credential::VerifiableCredential;
use crate::error::VcError;

/// Decides whether a credential's status-list entry is revoked.
pub trait RevocationChecker: Send + Sync {
    /// Check `vc`'s entry in the fetched `status_list` document.
    fn is_revoked(&self, vc: &VerifiableCredential, status_list: &Value) -> Result<bool, VcError>;
}

/// Bitstring status-list checker (base64 + gzip bitstring, MSB-first).
#[derive(Debug, Default, Clone)]
pub struct BitstringStatusList;

impl BitstringStatusList {
    /// Create a new checker.
    pub fn new() -> Self {
        Self
    }
}

impl RevocationChecker for BitstringStatusList {
    fn is_revoked(&self, vc: &VerifiableCredential, status_list: &Value) -> Result<bool, VcError> {
        let status = vc.credential_status.as_ref().ok_or_else(|| {
            VcError::StatusList("credential carries no credentialStatus entry".to_string())
        })?;
        let index = status
            .status_list_index
            .as_ref()
            .and_then(|i| i.as_usize())
            .ok_or_else(|| {
                VcError::StatusList("credentialStatus has no usable statusListIndex".to_string())
            })?;

        let encoded = extract_encoded_list(status_list).ok_or_else(|| {
            VcError::StatusList("status document carries no encodedList".to_string())
        })?;

        let bits = decode_bitstring(encoded)?;
        let byte = index / 8;
        if byte >= bits.len() {
            return Err(VcError::StatusList(format!(
                "statusListIndex {index} beyond list of {} bits",
                bits.len() * 8
            )));
        }
        let mask = 0x80 >> (index % 8);
        Ok(bits[byte] & mask != 0)
    }
}

/// Pull `encodedList` out of a status document — either a full status-list
/// credential (`credentialSubject.encodedList`) or a bare object.
fn extract_encoded_list(status_list: &Value) -> Option<&str> {
    status_list
        .get("credentialSubject")
        .and_then(|s| s.get("encodedList"))
        .or_else(|| status_list.get("encodedList"))
        .and_then(|v| v.as_str())
}

/// Decode a base64(gzip(bitstring)) payload.
///
/// Accepts both base64url-without-padding and standard base64 — issuers
/// emit both.
fn decode_bitstring(encoded: &str) -> Result<Vec<u8>, VcError> {
    let compressed = URL_SAFE_NO_PAD
        .decode(encoded.trim())
        .or_else(|_| BASE64_STANDARD.decode(encoded.trim()))
        .map_err(|e| VcError::StatusList(format!("encodedList base64 decode failed: {e}")))?;

    let mut decoder = GzDecoder::new(compressed.as_slice());
    let mut bits = Vec::new();
    decoder
        .read_to_end(&mut bits)
        .map_err(|e| VcError::StatusList(format!("encodedList gunzip failed: {e}")))?;
    Ok(bits)
}

/// Encode a bitstring as base64url(gzip(bits)) — the inverse of the
/// checker's decoding. Used by status-list issuance tooling and tests.
pub fn encode_bitstring(bits: &[u8]) -> String {
    use std::io::Write;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bits).expect("writing to a Vec cannot fail");
    let compressed = encoder.finish().expect("finishing a Vec-backed encoder cannot fail");
    URL_SAFE_NO_PAD.encode(compressed)
}
