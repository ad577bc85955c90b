//! # Pipeline Error Types
//!
//! [`PipelineError`] covers **infrastructure failures only** — "could not
//! determine an answer". Verification failures ("determined the content to
//! be invalid") are never errors; they are
//! [`VerificationResult`](crate::VerificationResult) values with
//! `ok: false`. Callers map the two differently: a `PipelineError` becomes
//! a 500-class response or a CLI infrastructure exit, a failed verdict is a
//! normal response body.

use thiserror::Error;

use prov_fetch::FetchError;
use prov_ledger::LedgerError;

/// Infrastructure failures during a verification call.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The ledger record could not be read.
    #[error("ledger lookup failed: {0}")]
    Lookup(#[from] LedgerError),

    /// The metadata document could not be fetched.
    #[error("metadata fetch failed: {0}")]
    MetadataFetch(#[from] FetchError),

    /// The metadata document was fetched but cannot be decoded into the
    /// metadata model (malformed response).
    #[error("metadata document malformed: {0}")]
    MetadataShape(String),
}
