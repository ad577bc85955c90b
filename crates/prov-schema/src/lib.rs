//! # prov-schema — Metadata Schema Validation
//!
//! Validates metadata documents against a JSON Schema (Draft 2020-12)
//! before the pipeline interprets them. Violations carry structured
//! diagnostic context — the JSON Pointer to the violating field and a
//! human-readable message — and serialize into verification results as-is.
//!
//! A default metadata schema ships with the crate
//! ([`MetadataSchema::bundled()`]); deployments can override it with a
//! schema file of their own ([`MetadataSchema::from_file()`]).

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The default metadata schema bundled with the crate.
const BUNDLED_SCHEMA: &str = include_str!("../schemas/metadata.schema.json");

/// A structured schema violation with diagnostic context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaViolation {
    /// JSON Pointer to the field that failed validation.
    #[serde(rename = "instancePath")]
    pub instance_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.instance_path, self.message)
    }
}

/// Errors from loading or compiling a schema.
///
/// Validation *failures* are not here — they are reported as
/// `Vec<SchemaViolation>` values, not errors, because a failing document
/// is an expected verification outcome.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema file could not be read or parsed.
    #[error("failed to load schema {path}: {reason}")]
    Load {
        /// Path of the schema that failed to load.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The schema could not be compiled into a validator.
    #[error("failed to compile schema: {0}")]
    Compile(String),
}

/// A compiled metadata schema validator.
pub struct MetadataSchema {
    validator: jsonschema::Validator,
    id: String,
}

impl std::fmt::Debug for MetadataSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataSchema").field("id", &self.id).finish()
    }
}

impl MetadataSchema {
    /// Compile a schema from a parsed JSON document.
    pub fn compile(schema: &Value) -> Result<Self, SchemaError> {
        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .build(schema)
            .map_err(|e| SchemaError::Compile(e.to_string()))?;
        let id = schema
            .get("$id")
            .and_then(|v| v.as_str())
            .unwrap_or("<anonymous>")
            .to_string();
        Ok(Self { validator, id })
    }

    /// Compile the bundled default metadata schema.
    pub fn bundled() -> Result<Self, SchemaError> {
        let schema: Value = serde_json::from_str(BUNDLED_SCHEMA).map_err(|e| {
            SchemaError::Load {
                path: "<bundled>".to_string(),
                reason: e.to_string(),
            }
        })?;
        Self::compile(&schema)
    }

    /// Load and compile a schema from a file.
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let schema: Value = serde_json::from_str(&content).map_err(|e| SchemaError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::compile(&schema)
    }

    /// The schema's `$id`, or `<anonymous>` if it has none.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Validate a document, returning every violation found.
    ///
    /// `Ok(())` means the document conforms; `Err(violations)` is an
    /// expected verification outcome, not an infrastructure failure.
    pub fn validate(&self, doc: &Value) -> Result<(), Vec<SchemaViolation>> {
        let violations: Vec<SchemaViolation> = self
            .validator
            .iter_errors(doc)
            .map(|err| SchemaViolation {
                instance_path: err.instance_path.to_string(),
                message: err.to_string(),
            })
            .collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
