//! # prov-core — Foundational Types for the Provenance Stack
//!
//! This crate provides the types shared across the workspace:
//!
//! - **Canonical serialization** — [`CanonicalBytes`], the sole construction
//!   path for bytes that feed Verifiable Credential proof computation.
//! - **Content digests** — [`ContentDigest`], BLAKE3-256 digests of raw
//!   content bytes, with hex rendering and parsing.
//! - **Token identifiers** — [`TokenId`] (full 256-bit range, parsed from
//!   decimal or hex) and [`TokenRef`] binding a token to its contract.
//! - **Ledger records** — [`ProvenanceRecord`], the immutable on-chain
//!   entry read back from the registry contract.
//! - **Metadata model** — [`ContentMetadata`], the off-chain metadata
//!   document referenced by a record, including the deterministic
//!   author-signature payload construction.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod metadata;
pub mod record;

// Re-export primary types.
pub use canonical::CanonicalBytes;
pub use digest::{blake3_digest, ContentDigest};
pub use error::{CanonicalizationError, DigestParseError, RecordError, TokenParseError};
pub use metadata::{ContentMetadata, CreatedAt, CredentialPointer, SignatureEntry};
pub use record::{ProvenanceRecord, TokenId, TokenRef};
