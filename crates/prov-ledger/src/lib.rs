//! # prov-ledger — Ledger Record Reading
//!
//! The pipeline's view of the on-chain registry is the [`RecordReader`]
//! trait: given a token identifier, return the immutable
//! [`ProvenanceRecord`](prov_core::ProvenanceRecord) or fail closed. There
//! is no default record and no internal retry — a reader that cannot answer
//! returns an error, and retry policy belongs to the caller.
//!
//! Two implementations:
//!
//! - [`EvmRecordReader`] — production reader calling `getRecord(uint256)`
//!   on an EVM registry contract via JSON-RPC `eth_call`.
//! - [`InMemoryRecordReader`] — deterministic reader for tests and local
//!   development.

pub mod abi;
pub mod error;
pub mod evm;
pub mod memory;

use async_trait::async_trait;

use prov_core::{ProvenanceRecord, TokenId};

pub use error::LedgerError;
pub use evm::{EvmLedgerConfig, EvmRecordReader};
pub use memory::InMemoryRecordReader;

/// Read-only access to the on-chain provenance registry.
///
/// Implementations MUST fail closed: an RPC error, a malformed response,
/// or an unknown token yields `Err`, never a default record.
#[async_trait]
pub trait RecordReader: Send + Sync {
    /// Fetch the provenance record for a token.
    async fn get_record(&self, token_id: &TokenId) -> Result<ProvenanceRecord, LedgerError>;
}
