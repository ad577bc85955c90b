//! # In-Memory Record Reader
//!
//! Deterministic [`RecordReader`](crate::RecordReader) backed by a map, for
//! tests and local development. Unknown tokens fail with an RPC-style error,
//! matching the revert behavior of the real contract — the reader never
//! invents a default record.

use std::collections::BTreeMap;

use async_trait::async_trait;

use prov_core::{ProvenanceRecord, TokenId};

use crate::error::LedgerError;
use crate::RecordReader;

/// Map-backed record reader.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRecordReader {
    records: BTreeMap<[u8; 32], ProvenanceRecord>,
}

impl InMemoryRecordReader {
    /// Create an empty reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record for a token (builder style).
    pub fn with_record(mut self, token_id: &TokenId, record: ProvenanceRecord) -> Self {
        self.records.insert(*token_id.as_be_bytes(), record);
        self
    }

    /// Insert a record for a token.
    pub fn insert(&mut self, token_id: &TokenId, record: ProvenanceRecord) {
        self.records.insert(*token_id.as_be_bytes(), record);
    }
}

#[async_trait]
impl RecordReader for InMemoryRecordReader {
    async fn get_record(&self, token_id: &TokenId) -> Result<ProvenanceRecord, LedgerError> {
        self.records
            .get(token_id.as_be_bytes())
            .cloned()
            .ok_or_else(|| LedgerError::Rpc {
                message: format!("execution reverted: unknown token {token_id}"),
            })
    }
}
