//! # prov-pipeline — The Content-Provenance Verification Pipeline
//!
//! Given raw file bytes and a reference to an on-chain provenance record,
//! decide whether the content, its declared metadata, its author's
//! signature, and an optional third-party credential are mutually
//! consistent and untampered — as a single structured verdict.
//!
//! ## Two kinds of "failure"
//!
//! - A [`VerificationResult`] with `ok: false` means *the content was
//!   determined to be invalid* — an expected outcome, carried as a value.
//! - A [`PipelineError`] means *no answer could be determined* — an
//!   infrastructure failure (RPC unreachable, metadata unfetchable),
//!   carried as `Err`.
//!
//! HTTP handlers and CLIs must map these differently (normal response vs
//! 500-class / infrastructure exit).
//!
//! ## Configuration is explicit
//!
//! The issuer allow-list ([`IssuerPolicy`]) and metadata schema
//! ([`SchemaPolicy`]) are constructor arguments, decided and logged at
//! load time — never silently discovered (or silently skipped) inside a
//! verification call.

pub mod error;
pub mod pipeline;
pub mod policy;
pub mod result;

// Re-export primary types.
pub use error::PipelineError;
pub use pipeline::VerificationPipeline;
pub use policy::{IssuerPolicy, PolicyError, SchemaPolicy};
pub use result::{reason, AuthorVerification, VerificationResult};
