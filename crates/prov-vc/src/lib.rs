//! # prov-vc — Verifiable Credentials
//!
//! Third-party attestation support for the verification pipeline:
//!
//! - [`VerifiableCredential`] — W3C VC Data Model envelope with the JSON
//!   polymorphism (`@context`, `type`, `issuer`, `proof`) handled at the
//!   serde level.
//! - [`CredentialVerifier`] — structural and cryptographic verification of
//!   Ed25519 proofs over JCS-canonicalized credential bodies, with key
//!   resolution behind the [`DidResolver`] seam.
//! - [`RevocationChecker`] — the status-list capability, with a
//!   [`BitstringStatusList`] implementation (base64 + gzip bitstring).
//!
//! Verification is deliberately fail-closed: an unresolvable issuer key, an
//! unsupported proof type, or a status list that cannot be interpreted is
//! an error, never a silent pass.

pub mod credential;
pub mod did;
pub mod error;
pub mod proof;
pub mod status;
pub mod verify;

// Re-export primary types.
pub use credential::{
    ContextValue, CredentialStatus, CredentialTypeValue, IssuerValue, ProofValue,
    VerifiableCredential,
};
pub use did::{DidResolver, KeyDidResolver, StaticDidResolver};
pub use error::VcError;
pub use proof::{Proof, ProofPurpose, ProofType};
pub use status::{encode_bitstring, BitstringStatusList, RevocationChecker};
pub use verify::{sign_credential, CredentialVerifier};
