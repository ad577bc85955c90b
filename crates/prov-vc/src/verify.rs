//! # Credential Verification
//!
//! Structural and cryptographic verification of a credential:
//!
//! 1. The `type` must include `"VerifiableCredential"` and the issuer must
//!    carry an identifier.
//! 2. An expired credential fails before any signature work.
//! 3. Every attached proof must be an Ed25519 proof, resolve to a key via
//!    the [`DidResolver`], and verify over the canonical signing input.
//!    A credential with zero proofs fails — there is no vacuous success.

use std::sync::Arc;

use chrono::Utc;

use prov_crypto::{verify_canonical, Ed25519Signature};

use crate::credential::VerifiableCredential;
use crate::did::DidResolver;
use crate::error::VcError;
use crate::proof::Proof;

/// Verifies credentials against a key-resolution seam.
#[derive(Clone)]
pub struct CredentialVerifier {
    resolver: Arc<dyn DidResolver>,
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVerifier").finish_non_exhaustive()
    }
}

impl CredentialVerifier {
    /// Create a verifier using the given resolver.
    pub fn new(resolver: Arc<dyn DidResolver>) -> Self {
        Self { resolver }
    }

    /// Verify a credential structurally and cryptographically.
    ///
    /// Returns `Ok(())` only if the envelope is well-formed, the credential
    /// is unexpired, and **all** proofs verify.
    pub fn verify(&self, vc: &VerifiableCredential) -> Result<(), VcError> {
        if !vc.credential_type.contains_vc_type() {
            return Err(VcError::MissingType);
        }
        if vc.issuer.id().is_empty() {
            return Err(VcError::MissingIssuer);
        }

        // Check expiration before spending CPU on signature verification.
        if let Some(expiration) = vc.expiration_date {
            if expiration < Utc::now() {
                return Err(VcError::Expired(expiration));
            }
        }

        let proofs = vc.proof.as_list();
        if proofs.is_empty() {
            return Err(VcError::NoProofs);
        }

        let canonical = vc.signing_input()?;
        for proof in proofs {
            self.verify_single_proof(proof, &canonical)?;
        }
        Ok(())
    }

    fn verify_single_proof(
        &self,
        proof: &Proof,
        canonical: &prov_core::CanonicalBytes,
    ) -> Result<(), VcError> {
        if !proof.proof_type.is_ed25519() {
            return Err(VcError::UnsupportedProofType(proof.proof_type.to_string()));
        }

        let key = self.resolver.resolve_key(&proof.verification_method)?;

        let sig = Ed25519Signature::from_hex(&proof.proof_value)
            .map_err(|e| VcError::InvalidProofValue(e.to_string()))?;

        verify_canonical(canonical, &sig, &key).map_err(|e| {
            VcError::VerificationFailed(format!(
                "proof from {}: {e}",
                proof.verification_method
            ))
        })
    }
}

/// Sign a credential with an Ed25519 key (issuance tooling and tests).
///
/// Computes the canonical signing input and appends an
/// `Ed25519Signature2020` proof naming `verification_method`.
pub fn sign_credential(
    vc: &mut VerifiableCredential,
    key_pair: &prov_crypto::Ed25519KeyPair,
    verification_method: String,
) -> Result<(), VcError> {
    let canonical = vc.signing_input()?;
    let signature = key_pair.sign_canonical(&canonical);
    vc.proof.push(Proof::new_ed25519(
        verification_method,
        signature.to_hex(),
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::{ContextValue, CredentialTypeValue, IssuerValue, ProofValue};
    use crate::did::{ed25519_did_key, KeyDidResolver, StaticDidResolver};
    use crate::proof::ProofType;
    use prov_crypto::Ed25519KeyPair;
    use serde_json::json;

    fn make_vc(issuer: &str) -> VerifiableCredential {
        VerifiableCredential {
            context: ContextValue::default(),
            id: Some("urn:prov:vc:test:001".to_string()),
            credential_type: CredentialTypeValue::Array(vec![
                "VerifiableCredential".to_string(),
                "ContentAttestation".to_string(),
            ]),
            issuer: IssuerValue::Id(issuer.to_string()),
            issuance_date: Some(Utc::now()),
            expiration_date: None,
            credential_subject: json!({"contentHash": "0xabc"}),
            credential_status: None,
            proof: ProofValue::default(),
        }
    }

    fn static_verifier(did: &str, kp: &Ed25519KeyPair) -> CredentialVerifier {
        CredentialVerifier::new(Arc::new(
            StaticDidResolver::new().with_key(did, kp.public_key()),
        ))
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let kp = Ed25519KeyPair::generate();
        let mut vc = make_vc("did:example:issuer-a");
        sign_credential(&mut vc, &kp, "did:example:issuer-a#key-1".to_string()).unwrap();

        let verifier = static_verifier("did:example:issuer-a", &kp);
        verifier.verify(&vc).expect("should verify");
    }

    #[test]
    fn verify_with_did_key_resolver() {
        let kp = Ed25519KeyPair::generate();
        let did = ed25519_did_key(&kp.public_key());
        let mut vc = make_vc(&did);
        sign_credential(&mut vc, &kp, did.clone()).unwrap();

        let verifier = CredentialVerifier::new(Arc::new(KeyDidResolver::new()));
        verifier.verify(&vc).expect("did:key verification");
    }

    #[test]
    fn wrong_key_fails() {
        let kp1 = Ed25519KeyPair::generate();
        let kp2 = Ed25519KeyPair::generate();
        let mut vc = make_vc("did:example:issuer-a");
        sign_credential(&mut vc, &kp1, "did:example:issuer-a#key-1".to_string()).unwrap();

        let verifier = static_verifier("did:example:issuer-a", &kp2);
        assert!(matches!(
            verifier.verify(&vc),
            Err(VcError::VerificationFailed(_))
        ));
    }

    #[test]
    fn tampered_subject_fails() {
        let kp = Ed25519KeyPair::generate();
        let mut vc = make_vc("did:example:issuer-a");
        sign_credential(&mut vc, &kp, "did:example:issuer-a#key-1".to_string()).unwrap();
        vc.credential_subject = json!({"contentHash": "0xtampered"});

        let verifier = static_verifier("did:example:issuer-a", &kp);
        assert!(verifier.verify(&vc).is_err());
    }

    #[test]
    fn no_proofs_fails() {
        let kp = Ed25519KeyPair::generate();
        let vc = make_vc("did:example:issuer-a");
        let verifier = static_verifier("did:example:issuer-a", &kp);
        assert!(matches!(verifier.verify(&vc), Err(VcError::NoProofs)));
    }

    #[test]
    fn expired_credential_fails() {
        let kp = Ed25519KeyPair::generate();
        let mut vc = make_vc("did:example:issuer-a");
        vc.expiration_date = Some(Utc::now() - chrono::Duration::days(1));
        sign_credential(&mut vc, &kp, "did:example:issuer-a#key-1".to_string()).unwrap();

        let verifier = static_verifier("did:example:issuer-a", &kp);
        assert!(matches!(verifier.verify(&vc), Err(VcError::Expired(_))));
    }

    #[test]
    fn unexpired_credential_passes() {
        let kp = Ed25519KeyPair::generate();
        let mut vc = make_vc("did:example:issuer-a");
        vc.expiration_date = Some(Utc::now() + chrono::Duration::days(365));
        sign_credential(&mut vc, &kp, "did:example:issuer-a#key-1".to_string()).unwrap();

        let verifier = static_verifier("did:example:issuer-a", &kp);
        verifier.verify(&vc).expect("unexpired should verify");
    }

    #[test]
    fn missing_vc_type_fails() {
        let kp = Ed25519KeyPair::generate();
        let mut vc = make_vc("did:example:issuer-a");
        vc.credential_type = CredentialTypeValue::Single("SomethingElse".to_string());
        sign_credential(&mut vc, &kp, "did:example:issuer-a#key-1".to_string()).unwrap();

        let verifier = static_verifier("did:example:issuer-a", &kp);
        assert!(matches!(verifier.verify(&vc), Err(VcError::MissingType)));
    }

    #[test]
    fn unsupported_proof_type_fails() {
        let kp = Ed25519KeyPair::generate();
        let mut vc = make_vc("did:example:issuer-a");
        vc.proof = ProofValue::Single(Box::new(Proof {
            proof_type: ProofType::Unsupported("BbsBlsSignature2020".to_string()),
            created: Utc::now(),
            verification_method: "did:example:issuer-a#key-1".to_string(),
            proof_purpose: crate::proof::ProofPurpose::AssertionMethod,
            proof_value: "00".repeat(64),
        }));

        let verifier = static_verifier("did:example:issuer-a", &kp);
        assert!(matches!(
            verifier.verify(&vc),
            Err(VcError::UnsupportedProofType(_))
        ));
    }

    #[test]
    fn unresolvable_key_fails() {
        let kp = Ed25519KeyPair::generate();
        let mut vc = make_vc("did:example:issuer-a");
        sign_credential(&mut vc, &kp, "did:example:issuer-a#key-1".to_string()).unwrap();

        let verifier = CredentialVerifier::new(Arc::new(StaticDidResolver::new()));
        assert!(matches!(verifier.verify(&vc), Err(VcError::Resolver(_))));
    }

    #[test]
    fn multi_proof_all_must_pass() {
        let kp1 = Ed25519KeyPair::generate();
        let kp2 = Ed25519KeyPair::generate();
        let mut vc = make_vc("did:example:issuer-a");
        sign_credential(&mut vc, &kp1, "did:example:signer-1".to_string()).unwrap();
        sign_credential(&mut vc, &kp2, "did:example:signer-2".to_string()).unwrap();

        let both = CredentialVerifier::new(Arc::new(
            StaticDidResolver::new()
                .with_key("did:example:signer-1", kp1.public_key())
                .with_key("did:example:signer-2", kp2.public_key()),
        ));
        both.verify(&vc).expect("both proofs resolve and verify");

        // Swap one key: the second proof must now fail the whole credential.
        let broken = CredentialVerifier::new(Arc::new(
            StaticDidResolver::new()
                .with_key("did:example:signer-1", kp1.public_key())
                .with_key("did:example:signer-2", kp1.public_key()),
        ));
        assert!(broken.verify(&vc).is_err());
    }

    #[test]
    fn malformed_proof_value_fails() {
        let kp = Ed25519KeyPair::generate();
        let mut vc = make_vc("did:example:issuer-a");
        vc.proof.push(Proof::new_ed25519(
            "did:example:issuer-a#key-1".to_string(),
            "not-hex".to_string(),
        ));

        let verifier = static_verifier("did:example:issuer-a", &kp);
        assert!(matches!(
            verifier.verify(&vc),
            Err(VcError::InvalidProofValue(_))
        ));
    }
}
