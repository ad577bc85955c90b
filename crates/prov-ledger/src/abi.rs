//! # ABI Encoding/Decoding for `getRecord(uint256)`
//!
//! The registry contract exposes:
//!
//! ```solidity
//! function getRecord(uint256 tokenId) external view
//!     returns (Record memory);
//! // struct Record { bytes32 contentHash; string metadataURI; bool revoked; }
//! ```
//!
//! The 4-byte selector is computed at runtime with Keccak-256 rather than
//! hard-coded. Return data is the ABI encoding of a single dynamic tuple
//! `(bytes32, string, bool)`: one head word holding the offset to the tuple,
//! then the tuple's own head (contentHash word, string offset word, bool
//! word) and tail (string length word + padded bytes). Every offset and
//! length is bounds-checked; anything out of shape is a [`LedgerError::Decode`].

use sha3::{Digest, Keccak256};

use prov_core::{ProvenanceRecord, TokenId};

use crate::error::LedgerError;

const WORD: usize = 32;

/// Compute the 4-byte function selector for `getRecord(uint256)`.
pub fn get_record_selector() -> [u8; 4] {
    let hash = Keccak256::digest(b"getRecord(uint256)");
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

/// Encode the `eth_call` calldata for `getRecord(tokenId)` as 0x-prefixed hex.
pub fn encode_get_record_call(token_id: &TokenId) -> String {
    let selector = get_record_selector();
    let mut data = String::with_capacity(2 + 8 + 64);
    data.push_str("0x");
    for b in selector {
        data.push_str(&format!("{b:02x}"));
    }
    for b in token_id.as_be_bytes() {
        data.push_str(&format!("{b:02x}"));
    }
    data
}

/// Decode `eth_call` return data (0x-prefixed hex) into a [`ProvenanceRecord`].
pub fn decode_get_record_return(hex: &str) -> Result<ProvenanceRecord, LedgerError> {
    let hex = hex.trim();
    let hex = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex);
    if hex.is_empty() {
        return Err(LedgerError::Decode(
            "empty return data (wrong contract address?)".to_string(),
        ));
    }
    let data = hex_to_bytes(hex).map_err(LedgerError::Decode)?;
    decode_record_bytes(&data)
}

fn decode_record_bytes(data: &[u8]) -> Result<ProvenanceRecord, LedgerError> {
    // Head word: offset to the tuple.
    let tuple_offset = read_usize_word(data, 0)?;
    // Tuple head: contentHash, string offset, revoked.
    let mut content_hash = [0u8; 32];
    content_hash.copy_from_slice(read_word(data, tuple_offset)?);

    let string_offset = read_usize_word(data, tuple_offset + WORD)?;
    let revoked = read_bool_word(data, tuple_offset + 2 * WORD)?;

    // String tail, offset relative to the tuple start.
    let string_base = tuple_offset
        .checked_add(string_offset)
        .ok_or_else(|| LedgerError::Decode("string offset overflow".to_string()))?;
    let string_len = read_usize_word(data, string_base)?;
    let string_start = string_base + WORD;
    let string_end = string_start
        .checked_add(string_len)
        .ok_or_else(|| LedgerError::Decode("string length overflow".to_string()))?;
    if string_end > data.len() {
        return Err(LedgerError::Decode(format!(
            "string tail out of bounds: {string_end} > {}",
            data.len()
        )));
    }
    let metadata_uri = String::from_utf8(data[string_start..string_end].to_vec())
        .map_err(|e| LedgerError::Decode(format!("metadataURI is not UTF-8: {e}")))?;

    Ok(ProvenanceRecord {
        content_hash,
        metadata_uri,
        revoked,
    })
}

fn read_word(data: &[u8], offset: usize) -> Result<&[u8], LedgerError> {
    let end = offset
        .checked_add(WORD)
        .ok_or_else(|| LedgerError::Decode("word offset overflow".to_string()))?;
    if end > data.len() {
        return Err(LedgerError::Decode(format!(
            "word at offset {offset} out of bounds ({} bytes total)",
            data.len()
        )));
    }
    Ok(&data[offset..end])
}

fn read_usize_word(data: &[u8], offset: usize) -> Result<usize, LedgerError> {
    let word = read_word(data, offset)?;
    // Offsets and lengths fit comfortably in 8 bytes for any real response;
    // a nonzero high portion means garbage data.
    if word[..WORD - 8].iter().any(|&b| b != 0) {
        return Err(LedgerError::Decode(format!(
            "unreasonably large word at offset {offset}"
        )));
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&word[WORD - 8..]);
    Ok(u64::from_be_bytes(buf) as usize)
}

fn read_bool_word(data: &[u8], offset: usize) -> Result<bool, LedgerError> {
    let word = read_word(data, offset)?;
    if word[..WORD - 1].iter().any(|&b| b != 0) || word[WORD - 1] > 1 {
        return Err(LedgerError::Decode(format!(
            "malformed bool word at offset {offset}"
        )));
    }
    Ok(word[WORD - 1] == 1)
}

fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, String> {
    if hex.len() % 2 != 0 {
        return Err("return data hex has odd length".to_string());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| format!("invalid hex at position {i}: {e}"))
        })
        .collect()
}

/// Encode a record as `getRecord` return data (0x-prefixed hex).
///
/// The inverse of [`decode_get_record_return()`]. This is the reference
/// encoding of the contract's return layout; mock RPC servers in tests use
/// it to produce realistic `eth_call` responses.
pub fn encode_record_return(
    content_hash: &[u8; 32],
    metadata_uri: &str,
    revoked: bool,
) -> String {
    let mut data: Vec<u8> = Vec::new();
    // Head: offset to tuple.
    data.extend_from_slice(&word_from_usize(WORD));
    // Tuple head.
    data.extend_from_slice(content_hash);
    data.extend_from_slice(&word_from_usize(3 * WORD)); // string offset, relative to tuple
    let mut bool_word = [0u8; 32];
    bool_word[31] = u8::from(revoked);
    data.extend_from_slice(&bool_word);
    // String tail.
    let uri = metadata_uri.as_bytes();
    data.extend_from_slice(&word_from_usize(uri.len()));
    data.extend_from_slice(uri);
    let pad = (WORD - uri.len() % WORD) % WORD;
    data.extend_from_slice(&vec![0u8; pad]);

    let hex: String = data.iter().map(|b| format!("{b:02x}")).collect();
    format!("0x{hex}")
}

fn word_from_usize(n: usize) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&(n as u64).to_be_bytes());
    word
}
