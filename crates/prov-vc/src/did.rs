//! # DID Resolution Seam
//!
//! Credential proofs name their signing key with a DID URL (the
//! `verificationMethod`). [`DidResolver`] turns that URL into an Ed25519
//! public key. Two resolvers ship here:
//!
//! - [`KeyDidResolver`] — self-certifying `did:key` identifiers, where the
//!   key material is embedded in the identifier itself (multibase
//!   base58btc, Ed25519 multicodec prefix `0xed 0x01`).
//! - [`StaticDidResolver`] — a pinned map from DID (or full verification
//!   method) to key, for deployments that trust a fixed issuer set and for
//!   tests.
//!
//! Resolution is synchronous: both resolvers work from local material.
//! A networked DID-document resolver would implement the same trait behind
//! its own caching layer.

use std::collections::BTreeMap;

use base58::{FromBase58, ToBase58};

use prov_crypto::Ed25519PublicKey;

use crate::error::VcError;

/// Multicodec prefix for Ed25519 public keys in did:key.
const ED25519_MULTICODEC: [u8; 2] = [0xed, 0x01];

/// Resolves a verification method (DID URL) to an Ed25519 public key.
pub trait DidResolver: Send + Sync {
    /// Resolve `verification_method` to a public key, or explain why not.
    fn resolve_key(&self, verification_method: &str) -> Result<Ed25519PublicKey, VcError>;
}

/// Resolver for self-certifying `did:key` identifiers.
#[derive(Debug, Default, Clone)]
pub struct KeyDidResolver;

impl KeyDidResolver {
    /// Create a new did:key resolver.
    pub fn new() -> Self {
        Self
    }
}

impl DidResolver for KeyDidResolver {
    fn resolve_key(&self, verification_method: &str) -> Result<Ed25519PublicKey, VcError> {
        // Strip any key fragment: did:key:z6Mk…#z6Mk… names a key inside
        // the DID document, but for did:key the material is in the DID.
        let did = verification_method
            .split('#')
            .next()
            .unwrap_or(verification_method);

        let multibase = did.strip_prefix("did:key:").ok_or_else(|| {
            VcError::Resolver(format!("not a did:key identifier: {did}"))
        })?;

        // Multibase prefix 'z' = base58btc.
        let encoded = multibase.strip_prefix('z').ok_or_else(|| {
            VcError::Resolver(format!("unsupported multibase prefix in {multibase:?}"))
        })?;

        let decoded = encoded
            .from_base58()
            .map_err(|e| VcError::Resolver(format!("base58 decode failed: {e:?}")))?;

        if decoded.len() != 34 || decoded[..2] != ED25519_MULTICODEC {
            return Err(VcError::Resolver(format!(
                "did:key is not an Ed25519 key (got {} bytes)",
                decoded.len()
            )));
        }

        let mut key = [0u8; 32];
        key.copy_from_slice(&decoded[2..]);
        Ok(Ed25519PublicKey::from_bytes(key))
    }
}

/// Resolver backed by a pinned DID → key map.
///
/// Lookup tries the full verification method first, then the bare DID
/// (everything before `#`).
#[derive(Debug, Default, Clone)]
pub struct StaticDidResolver {
    keys: BTreeMap<String, Ed25519PublicKey>,
}

impl StaticDidResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin a key for a DID or verification method (builder style).
    pub fn with_key(mut self, did: impl Into<String>, key: Ed25519PublicKey) -> Self {
        self.keys.insert(did.into(), key);
        self
    }

    /// Pin a key for a DID or verification method.
    pub fn insert(&mut self, did: impl Into<String>, key: Ed25519PublicKey) {
        self.keys.insert(did.into(), key);
    }
}

impl DidResolver for StaticDidResolver {
    fn resolve_key(&self, verification_method: &str) -> Result<Ed25519PublicKey, VcError> {
        if let Some(key) = self.keys.get(verification_method) {
            return Ok(key.clone());
        }
        let did = verification_method
            .split('#')
            .next()
            .unwrap_or(verification_method);
        self.keys.get(did).cloned().ok_or_else(|| {
            VcError::Resolver(format!("no pinned key for {verification_method}"))
        })
    }
}

/// Encode an Ed25519 public key as a `did:key` identifier.
///
/// The inverse of [`KeyDidResolver`] resolution; used by issuance tooling
/// and tests.
pub fn ed25519_did_key(key: &Ed25519PublicKey) -> String {
    let mut material = Vec::with_capacity(34);
    material.extend_from_slice(&ED25519_MULTICODEC);
    material.extend_from_slice(key.as_bytes());
    format!("did:key:z{}", material.to_base58())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prov_crypto::Ed25519KeyPair;

    #[test]
    fn did_key_roundtrip() {
        let kp = Ed25519KeyPair::generate();
        let did = ed25519_did_key(&kp.public_key());
        assert!(did.starts_with("did:key:z"));

        let resolved = KeyDidResolver::new().resolve_key(&did).unwrap();
        assert_eq!(resolved, kp.public_key());
    }

    #[test]
    fn did_key_with_fragment_resolves() {
        let kp = Ed25519KeyPair::generate();
        let did = ed25519_did_key(&kp.public_key());
        let vm = format!("{did}#{}", &did["did:key:".len()..]);
        let resolved = KeyDidResolver::new().resolve_key(&vm).unwrap();
        assert_eq!(resolved, kp.public_key());
    }

    #[test]
    fn non_did_key_rejected() {
        let result = KeyDidResolver::new().resolve_key("did:web:example.com#key-1");
        assert!(matches!(result, Err(VcError::Resolver(_))));
    }

    #[test]
    fn wrong_multibase_prefix_rejected() {
        let result = KeyDidResolver::new().resolve_key("did:key:f00baa");
        assert!(matches!(result, Err(VcError::Resolver(_))));
    }

    #[test]
    fn non_ed25519_material_rejected() {
        // Valid base58 but wrong multicodec prefix / length.
        let material = [0x12u8, 0x20, 0xaa, 0xbb];
        let did = format!("did:key:z{}", material.to_base58());
        let result = KeyDidResolver::new().resolve_key(&did);
        assert!(matches!(result, Err(VcError::Resolver(_))));
    }

    #[test]
    fn static_resolver_exact_match() {
        let kp = Ed25519KeyPair::generate();
        let resolver =
            StaticDidResolver::new().with_key("did:example:issuer-a#key-1", kp.public_key());
        let resolved = resolver.resolve_key("did:example:issuer-a#key-1").unwrap();
        assert_eq!(resolved, kp.public_key());
    }

    #[test]
    fn static_resolver_falls_back_to_bare_did() {
        let kp = Ed25519KeyPair::generate();
        let resolver = StaticDidResolver::new().with_key("did:example:issuer-a", kp.public_key());
        let resolved = resolver.resolve_key("did:example:issuer-a#key-1").unwrap();
        assert_eq!(resolved, kp.public_key());
    }

    #[test]
    fn static_resolver_unknown_did_fails() {
        let resolver = StaticDidResolver::new();
        assert!(matches!(
            resolver.resolve_key("did:example:unknown"),
            Err(VcError::Resolver(_))
        ));
    }
}
