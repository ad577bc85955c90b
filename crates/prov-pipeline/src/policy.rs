//! # Pipeline Configuration Policies
//!
//! The pipeline's two tunable checks are configured explicitly at
//! construction, never discovered implicitly at verification time:
//!
//! - [`IssuerPolicy`] — which credential issuers are trusted. The
//!   `Unrestricted` / `Restricted` split is visible to callers, so a
//!   deployment can assert whether restriction was actually applied
//!   instead of inferring it from a silently-missing config file.
//! - [`SchemaPolicy`] — whether metadata documents are validated against a
//!   schema. A deployment that cannot obtain a schema makes the `Skip`
//!   decision at load time, where it is logged; the pipeline itself never
//!   swallows a schema load failure.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use prov_schema::{MetadataSchema, SchemaError};

/// Errors from loading policy configuration documents.
#[derive(Error, Debug)]
pub enum PolicyError {
    /// The configuration file could not be read or parsed.
    #[error("failed to load issuer allow-list {path}: {reason}")]
    Load {
        /// Path of the configuration document.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The document does not have the expected `{"issuers": [..]}` shape.
    #[error("malformed issuer allow-list: {0}")]
    Shape(String),
}

/// Which credential issuers the pipeline trusts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssuerPolicy {
    /// Any cryptographically valid issuer is accepted.
    Unrestricted,
    /// Only the listed issuer identifiers are accepted.
    Restricted(BTreeSet<String>),
}

impl IssuerPolicy {
    /// Whether `issuer` passes this policy.
    pub fn allows(&self, issuer: &str) -> bool {
        match self {
            IssuerPolicy::Unrestricted => true,
            IssuerPolicy::Restricted(set) => set.contains(issuer),
        }
    }

    /// Whether a restriction is in force.
    pub fn is_restricted(&self) -> bool {
        matches!(self, IssuerPolicy::Restricted(_))
    }

    /// Build a policy from an allow-list document: `{"issuers": ["did:…"]}`.
    ///
    /// An empty `issuers` array means "no restriction".
    pub fn from_document(doc: &Value) -> Result<Self, PolicyError> {
        let issuers = doc
            .get("issuers")
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                PolicyError::Shape("expected an object with an \"issuers\" array".to_string())
            })?;

        let mut set = BTreeSet::new();
        for entry in issuers {
            let issuer = entry.as_str().ok_or_else(|| {
                PolicyError::Shape(format!("non-string issuer entry: {entry}"))
            })?;
            set.insert(issuer.to_string());
        }

        if set.is_empty() {
            Ok(IssuerPolicy::Unrestricted)
        } else {
            Ok(IssuerPolicy::Restricted(set))
        }
    }

    /// Load a policy from an allow-list file.
    pub fn from_file(path: &Path) -> Result<Self, PolicyError> {
        let content = std::fs::read_to_string(path).map_err(|e| PolicyError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let doc: Value = serde_json::from_str(&content).map_err(|e| PolicyError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_document(&doc)
    }
}

/// Whether metadata documents are schema-validated.
#[derive(Debug, Clone)]
pub enum SchemaPolicy {
    /// No schema validation. The decision to skip was made — and logged —
    /// by whoever built the pipeline configuration.
    Skip,
    /// Validate every metadata document against the compiled schema.
    Validate(Arc<MetadataSchema>),
}

impl SchemaPolicy {
    /// Validation with the bundled default metadata schema.
    pub fn bundled() -> Result<Self, SchemaError> {
        Ok(SchemaPolicy::Validate(Arc::new(MetadataSchema::bundled()?)))
    }

    /// Validation with a schema loaded from a file.
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        Ok(SchemaPolicy::Validate(Arc::new(MetadataSchema::from_file(
            path,
        )?)))
    }

    /// Whether validation is in force.
    pub fn is_validating(&self) -> bool {
        matches!(self, SchemaPolicy::Validate(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unrestricted_allows_anyone() {
        let policy = IssuerPolicy::Unrestricted;
        assert!(policy.allows("did:example:anyone"));
        assert!(!policy.is_restricted());
    }

    #[test]
    fn restricted_allows_members_only() {
        let policy = IssuerPolicy::Restricted(
            ["did:example:A".to_string()].into_iter().collect(),
        );
        assert!(policy.allows("did:example:A"));
        assert!(!policy.allows("did:example:B"));
        assert!(policy.is_restricted());
    }

    #[test]
    fn from_document_builds_restricted_set() {
        let policy = IssuerPolicy::from_document(&json!({
            "issuers": ["did:example:A", "did:example:B"]
        }))
        .unwrap();
        assert!(policy.is_restricted());
        assert!(policy.allows("did:example:B"));
        assert!(!policy.allows("did:example:C"));
    }

    #[test]
    fn empty_issuer_list_is_unrestricted() {
        let policy = IssuerPolicy::from_document(&json!({"issuers": []})).unwrap();
        assert_eq!(policy, IssuerPolicy::Unrestricted);
    }

    #[test]
    fn missing_issuers_key_is_an_error() {
        assert!(matches!(
            IssuerPolicy::from_document(&json!({})),
            Err(PolicyError::Shape(_))
        ));
    }

    #[test]
    fn non_string_issuer_is_an_error() {
        assert!(matches!(
            IssuerPolicy::from_document(&json!({"issuers": [42]})),
            Err(PolicyError::Shape(_))
        ));
    }

    #[test]
    fn from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("allowedIssuers.json");
        std::fs::write(&path, r#"{"issuers": ["did:example:A"]}"#).unwrap();

        let policy = IssuerPolicy::from_file(&path).unwrap();
        assert!(policy.allows("did:example:A"));
        assert!(!policy.allows("did:example:Z"));
    }

    #[test]
    fn from_file_missing_is_a_load_error() {
        let result = IssuerPolicy::from_file(Path::new("/no/such/allowedIssuers.json"));
        assert!(matches!(result, Err(PolicyError::Load { .. })));
    }

    #[test]
    fn schema_policy_bundled_validates() {
        let policy = SchemaPolicy::bundled().unwrap();
        assert!(policy.is_validating());
    }

    #[test]
    fn schema_policy_skip_does_not_validate() {
        assert!(!SchemaPolicy::Skip.is_validating());
    }
}
