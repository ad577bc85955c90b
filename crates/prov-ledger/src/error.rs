//! # Ledger Error Types
//!
//! Every variant here is an infrastructure failure: the reader could not
//! produce an authoritative answer. None of these map to a verification
//! verdict — the pipeline surfaces them as hard failures.

use thiserror::Error;

/// Errors from ledger record reading.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The RPC endpoint could not be reached or returned a transport-level
    /// failure.
    #[error("ledger endpoint unavailable: {reason}")]
    Transport {
        /// Human-readable transport failure description.
        reason: String,
    },

    /// The RPC request timed out.
    #[error("ledger request timed out")]
    Timeout,

    /// The endpoint returned a JSON-RPC error object (e.g. a revert for an
    /// unknown token).
    #[error("ledger RPC error: {message}")]
    Rpc {
        /// The JSON-RPC error message.
        message: String,
    },

    /// The JSON-RPC response carried no `result` field.
    #[error("ledger response missing 'result' field")]
    MissingResult,

    /// The `eth_call` return data could not be decoded as a provenance
    /// record.
    #[error("failed to decode record return data: {0}")]
    Decode(String),

    /// The reader configuration is invalid (bad address, unbuildable
    /// client).
    #[error("ledger configuration error: {0}")]
    Config(String),
}
