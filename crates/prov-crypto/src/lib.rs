//! # prov-crypto — Cryptographic Primitives for the Provenance Stack
//!
//! This crate provides the signature machinery used by the verification
//! pipeline:
//!
//! - **Ed25519 detached-signature verification** for author signatures
//!   (base64-encoded keys and signatures, as they appear in metadata
//!   documents) and for Verifiable Credential proofs (hex-encoded proof
//!   values over [`CanonicalBytes`](prov_core::CanonicalBytes)).
//! - **Key pair handling** for signing in tests and tooling. Private keys
//!   are never serialized or logged.

pub mod ed25519;
pub mod error;

// Re-export primary types.
pub use ed25519::{
    verify_canonical, verify_detached, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature,
};
pub use error::CryptoError;
