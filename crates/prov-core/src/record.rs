//! # Ledger Records and Token References
//!
//! Types describing the on-chain side of verification: the token being
//! verified ([`TokenRef`]) and the immutable record read back from the
//! registry contract ([`ProvenanceRecord`]).
//!
//! Token identifiers cover the full `uint256` range of the registry
//! contract. [`TokenId`] keeps both the 32-byte big-endian value (for ABI
//! encoding) and the caller's textual form (echoed in verification results).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::error::{RecordError, TokenParseError};

/// A registry token identifier (`uint256`).
///
/// Parsed from a decimal string (`"42"`) or a `0x`-prefixed hex string.
/// Equality is on the numeric value; `Display` preserves the textual form
/// the caller supplied.
#[derive(Clone)]
pub struct TokenId {
    bytes: [u8; 32],
    text: String,
}

impl TokenId {
    /// Return the value as 32 big-endian bytes for ABI encoding.
    pub fn as_be_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// The textual form the identifier was parsed from.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for TokenId {
    type Err = TokenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(TokenParseError::Empty);
        }

        let bytes = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
        {
            parse_hex_u256(hex)?
        } else {
            parse_decimal_u256(text)?
        };

        Ok(Self {
            bytes,
            text: text.to_string(),
        })
    }
}

impl PartialEq for TokenId {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for TokenId {}

impl std::hash::Hash for TokenId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl std::fmt::Debug for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TokenId({})", self.text)
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for TokenId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for TokenId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse a decimal string into a 256-bit big-endian value.
///
/// Schoolbook multiply-by-ten with carry over the 32-byte buffer; a carry
/// out of the top byte means the value exceeds 256 bits.
fn parse_decimal_u256(s: &str) -> Result<[u8; 32], TokenParseError> {
    let mut acc = [0u8; 32];
    for c in s.chars() {
        let digit = c.to_digit(10).ok_or(TokenParseError::BadDigit(c))? as u16;
        let mut carry = digit;
        for byte in acc.iter_mut().rev() {
            let v = (*byte as u16) * 10 + carry;
            *byte = (v & 0xff) as u8;
            carry = v >> 8;
        }
        if carry != 0 {
            return Err(TokenParseError::Overflow);
        }
    }
    Ok(acc)
}

/// Parse a hex string (without prefix) into a 256-bit big-endian value.
fn parse_hex_u256(s: &str) -> Result<[u8; 32], TokenParseError> {
    if s.is_empty() {
        return Err(TokenParseError::Empty);
    }
    let mut acc = [0u8; 32];
    for c in s.chars() {
        let digit = c.to_digit(16).ok_or(TokenParseError::BadDigit(c))? as u16;
        let mut carry = digit;
        for byte in acc.iter_mut().rev() {
            let v = ((*byte as u16) << 4) | carry;
            *byte = (v & 0xff) as u8;
            carry = v >> 8;
        }
        if carry != 0 {
            return Err(TokenParseError::Overflow);
        }
    }
    Ok(acc)
}

/// A token reference: registry contract address plus token identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRef {
    /// The registry contract address (`0x` + 40 hex chars).
    pub contract: String,
    /// The token identifier within that contract.
    pub token_id: TokenId,
}

impl TokenRef {
    /// Create a token reference, validating the contract address format.
    pub fn new(contract: impl Into<String>, token_id: TokenId) -> Result<Self, RecordError> {
        let contract = contract.into();
        if !is_valid_eth_address(&contract) {
            return Err(RecordError::InvalidContractAddress(contract));
        }
        Ok(Self { contract, token_id })
    }
}

/// The immutable on-chain provenance record for a token.
///
/// `content_hash` never changes after mint; `revoked` is monotonic
/// (false → true only). The ledger owns this data — the pipeline only
/// reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceRecord {
    /// BLAKE3-256 digest of the committed content (raw bytes, from the
    /// contract's `bytes32`).
    pub content_hash: [u8; 32],
    /// URI of the off-chain metadata document.
    pub metadata_uri: String,
    /// Whether the token has been revoked.
    pub revoked: bool,
}

/// Validate that a string is a well-formed Ethereum address (0x + 40 hex chars).
pub fn is_valid_eth_address(addr: &str) -> bool {
    addr.len() == 42
        && addr.starts_with("0x")
        && addr[2..].chars().all(|c| c.is_ascii_hexdigit())
}
