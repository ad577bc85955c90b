//! # The Verification Pipeline
//!
//! An ordered sequence of fallible steps, each gating the next:
//!
//! 1. **Digest** — BLAKE3-256 over the input bytes (pure).
//! 2. **RecordLookup** — read the on-chain record; RPC failures propagate
//!    as [`PipelineError`], never as a verdict.
//! 3. **RevocationCheck** — a revoked record terminates before any
//!    off-chain fetch.
//! 4. **HashMatch** — the central trust check binding content bytes to the
//!    on-chain commitment; still before any fetch.
//! 5. **MetadataFetch** — resolve the record's metadata URI.
//! 6. **SchemaValidate** — under [`SchemaPolicy::Validate`], violations
//!    terminate with the structured list attached.
//! 7. **AuthorSignatureCheck** — Ed25519 detached signature over
//!    `contentHash||createdAt`.
//! 8. **CredentialCheck** — only when the metadata names a credential:
//!    fetch, verify, status-list revocation, issuer allow-list.
//!
//! Each step either falls through to the next, terminates with an
//! `ok: false` verdict, or fails the whole call with an infrastructure
//! error. The ordering is load-bearing: revocation and hash checks run
//! before any fetch so that already-invalid tokens cause no outbound
//! requests, and the step sequence below is written as explicit early
//! returns so the order stays auditable.
//!
//! The pipeline holds no mutable state and is safe to share across
//! concurrent verification calls; repeated calls with unchanged external
//! state produce identical results.

use std::sync::Arc;

use prov_core::{blake3_digest, ContentMetadata, CredentialPointer, TokenRef};
use prov_crypto::{verify_detached, Ed25519PublicKey, Ed25519Signature};
use prov_fetch::ResourceFetcher;
use prov_ledger::RecordReader;
use prov_vc::{CredentialVerifier, RevocationChecker, VerifiableCredential};

use crate::error::PipelineError;
use crate::policy::{IssuerPolicy, SchemaPolicy};
use crate::result::{reason, AuthorVerification, VerificationResult};

/// The content-provenance verification pipeline.
pub struct VerificationPipeline {
    ledger: Arc<dyn RecordReader>,
    fetcher: Arc<dyn ResourceFetcher>,
    credentials: CredentialVerifier,
    revocation: Arc<dyn RevocationChecker>,
    issuer_policy: IssuerPolicy,
    schema_policy: SchemaPolicy,
}

impl std::fmt::Debug for VerificationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationPipeline")
            .field("issuer_policy", &self.issuer_policy)
            .field("schema_policy", &self.schema_policy)
            .finish_non_exhaustive()
    }
}

impl VerificationPipeline {
    /// Assemble a pipeline from its leaf collaborators and policies.
    pub fn new(
        ledger: Arc<dyn RecordReader>,
        fetcher: Arc<dyn ResourceFetcher>,
        credentials: CredentialVerifier,
        revocation: Arc<dyn RevocationChecker>,
        issuer_policy: IssuerPolicy,
        schema_policy: SchemaPolicy,
    ) -> Self {
        Self {
            ledger,
            fetcher,
            credentials,
            revocation,
            issuer_policy,
            schema_policy,
        }
    }

    /// The issuer policy in force — callers can assert whether restriction
    /// was actually applied.
    pub fn issuer_policy(&self) -> &IssuerPolicy {
        &self.issuer_policy
    }

    /// The schema policy in force.
    pub fn schema_policy(&self) -> &SchemaPolicy {
        &self.schema_policy
    }

    /// Verify `content` against the on-chain record for `token`.
    ///
    /// `Ok(result)` is a verdict either way — check `result.ok`. `Err` means
    /// the pipeline could not determine an answer (infrastructure failure).
    pub async fn verify(
        &self,
        content: &[u8],
        token: &TokenRef,
    ) -> Result<VerificationResult, PipelineError> {
        // Digest — pure, cannot fail.
        let computed = blake3_digest(content);
        tracing::debug!(token = %token.token_id, digest = %computed, "starting verification");

        // RecordLookup — fail closed, no retry here.
        let record = self.ledger.get_record(&token.token_id).await?;

        // RevocationCheck — before any off-chain fetch.
        if record.revoked {
            tracing::info!(token = %token.token_id, "token is revoked");
            return Ok(VerificationResult::failure(reason::TOKEN_REVOKED));
        }

        // HashMatch — byte comparison against the decoded bytes32.
        if computed.as_bytes() != &record.content_hash {
            tracing::info!(token = %token.token_id, "content digest does not match record");
            return Ok(VerificationResult::failure(reason::HASH_MISMATCH));
        }

        // MetadataFetch — unfetchable metadata is an infrastructure error.
        let raw_metadata = self.fetcher.fetch_json(&record.metadata_uri).await?;

        // SchemaValidate — the skip decision was made at configuration load.
        if let SchemaPolicy::Validate(schema) = &self.schema_policy {
            if let Err(violations) = schema.validate(&raw_metadata) {
                tracing::info!(
                    token = %token.token_id,
                    violations = violations.len(),
                    "metadata failed schema validation"
                );
                return Ok(VerificationResult::schema_failure(violations));
            }
        }

        let metadata = ContentMetadata::from_value(raw_metadata)
            .map_err(|e| PipelineError::MetadataShape(e.to_string()))?;

        // AuthorSignatureCheck.
        let author = match self.check_author_signature(&metadata) {
            Ok(author) => author,
            Err(why) => return Ok(VerificationResult::failure(why)),
        };

        // CredentialCheck — only when the metadata names a credential.
        if let Some(pointer) = &metadata.verifiable_credential {
            if let Err(why) = self.check_credential(pointer).await {
                return Ok(VerificationResult::failure(why));
            }
        }

        Ok(VerificationResult::success(&computed, token, author))
    }

    /// Check the author's detached signature over `contentHash||createdAt`.
    ///
    /// Returns the verification mode on success, or the verdict reason on
    /// failure. Decode failures of the embedded key or signature count as
    /// an invalid signature — the metadata claims a signature it cannot
    /// substantiate.
    fn check_author_signature(
        &self,
        metadata: &ContentMetadata,
    ) -> Result<AuthorVerification, String> {
        let Some(entry) = metadata.signatures.first() else {
            return Err(reason::MISSING_AUTHOR_SIGNATURE.to_string());
        };

        match (&entry.pub_key, &metadata.author_did) {
            (Some(pub_b64), _) => {
                let payload = metadata.signing_payload();
                let key = Ed25519PublicKey::from_base64(pub_b64)
                    .map_err(|_| reason::AUTHOR_SIGNATURE_INVALID.to_string())?;
                let sig = Ed25519Signature::from_base64(&entry.sig)
                    .map_err(|_| reason::AUTHOR_SIGNATURE_INVALID.to_string())?;
                verify_detached(&payload, &sig, &key)
                    .map_err(|_| reason::AUTHOR_SIGNATURE_INVALID.to_string())?;
                Ok(AuthorVerification::Verified)
            }
            (None, Some(did)) => {
                // No key to check against — surface the gap instead of
                // claiming a verified signature.
                tracing::warn!(%did, "author signature carries a DID only; not cryptographically verified");
                Ok(AuthorVerification::DidOnly)
            }
            (None, None) => Err(reason::NO_DID_OR_PUBKEY.to_string()),
        }
    }

    /// Check the metadata's Verifiable Credential.
    ///
    /// Inside this branch, fetch and verification failures are verdicts
    /// (`VC invalid: …`) rather than infrastructure errors: the metadata
    /// claims a credential, so an unverifiable credential means the claim
    /// does not hold.
    async fn check_credential(&self, pointer: &CredentialPointer) -> Result<(), String> {
        let vc_doc = self
            .fetcher
            .fetch_json(&pointer.uri)
            .await
            .map_err(reason::vc_invalid)?;
        let vc = VerifiableCredential::from_value(vc_doc).map_err(reason::vc_invalid)?;

        self.credentials.verify(&vc).map_err(reason::vc_invalid)?;

        if let Some(status_uri) = &pointer.status_list {
            // The fragment addresses an entry within the list document.
            let list_uri = status_uri.split('#').next().unwrap_or(status_uri);
            let status_doc = self
                .fetcher
                .fetch_json(list_uri)
                .await
                .map_err(reason::vc_invalid)?;
            match self.revocation.is_revoked(&vc, &status_doc) {
                Ok(true) => return Err(reason::VC_REVOKED.to_string()),
                Ok(false) => {}
                Err(e) => return Err(reason::vc_invalid(e)),
            }
        }

        if !self.issuer_policy.allows(vc.issuer.id()) {
            tracing::info!(issuer = vc.issuer.id(), "credential issuer not on allow-list");
            return Err(reason::VC_ISSUER_NOT_ALLOWED.to_string());
        }

        Ok(())
    }
}
