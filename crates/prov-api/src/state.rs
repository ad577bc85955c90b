//! # Application State and Configuration
//!
//! Process-wide configuration is resolved once at startup. The issuer
//! allow-list and metadata schema policies are decided here — visibly and
//! with logging — so the per-request pipeline never makes silent fallback
//! decisions. A configured-but-unloadable policy file fails startup
//! instead of degrading quietly.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use prov_fetch::{HttpResourceFetcher, ResourceFetcher};
use prov_pipeline::{IssuerPolicy, SchemaPolicy};
use prov_vc::{BitstringStatusList, DidResolver, KeyDidResolver, RevocationChecker};

/// Startup configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Socket address to bind (`PROV_BIND_ADDR`, default `0.0.0.0:8787`).
    pub bind_addr: String,
    /// Outbound HTTP timeout in seconds (`PROV_HTTP_TIMEOUT_SECS`, default 30).
    pub http_timeout_secs: u64,
    /// Issuer allow-list path (`PROV_ALLOWED_ISSUERS`). Absent means
    /// unrestricted.
    pub allowed_issuers: Option<PathBuf>,
    /// Metadata schema path (`PROV_METADATA_SCHEMA`). Absent means the
    /// bundled schema; the literal value `off` disables validation.
    pub metadata_schema: Option<String>,
}

impl ApiConfig {
    /// Read configuration from `PROV_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("PROV_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8787".to_string()),
            http_timeout_secs: std::env::var("PROV_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            allowed_issuers: std::env::var("PROV_ALLOWED_ISSUERS").ok().map(PathBuf::from),
            metadata_schema: std::env::var("PROV_METADATA_SCHEMA").ok(),
        }
    }
}

/// Errors during service startup.
#[derive(Error, Debug)]
pub enum StateError {
    /// The issuer allow-list was configured but could not be loaded.
    #[error("issuer allow-list: {0}")]
    IssuerPolicy(#[from] prov_pipeline::PolicyError),

    /// The metadata schema was configured but could not be loaded.
    #[error("metadata schema: {0}")]
    Schema(#[from] prov_schema::SchemaError),

    /// The outbound HTTP client could not be built.
    #[error("fetcher: {0}")]
    Fetcher(#[from] prov_fetch::FetchError),
}

/// Shared application state: the pipeline's process-wide collaborators.
///
/// Everything here is immutable after startup and safe for concurrent
/// reads — per-request state (the ledger reader bound to the request's
/// RPC endpoint) is built in the handler.
#[derive(Clone)]
pub struct AppState {
    /// Shared outbound fetcher for metadata, credentials, and status lists.
    pub fetcher: Arc<dyn ResourceFetcher>,
    /// DID resolver for credential proofs.
    pub resolver: Arc<dyn DidResolver>,
    /// Status-list revocation checker.
    pub revocation: Arc<dyn RevocationChecker>,
    /// Issuer allow-list policy, decided at startup.
    pub issuer_policy: IssuerPolicy,
    /// Metadata schema policy, decided at startup.
    pub schema_policy: SchemaPolicy,
    /// Timeout for per-request ledger readers.
    pub ledger_timeout_secs: u64,
}

impl AppState {
    /// Build the application state, resolving policies with logging.
    pub fn from_config(config: &ApiConfig) -> Result<Self, StateError> {
        let issuer_policy = match &config.allowed_issuers {
            Some(path) => {
                let policy = IssuerPolicy::from_file(path)?;
                tracing::info!(
                    path = %path.display(),
                    restricted = policy.is_restricted(),
                    "issuer allow-list loaded"
                );
                policy
            }
            None => {
                tracing::info!("no issuer allow-list configured; accepting any valid issuer");
                IssuerPolicy::Unrestricted
            }
        };

        let schema_policy = match config.metadata_schema.as_deref() {
            Some("off") => {
                tracing::warn!("metadata schema validation disabled by configuration");
                SchemaPolicy::Skip
            }
            Some(path) => {
                let policy = SchemaPolicy::from_file(std::path::Path::new(path))?;
                tracing::info!(path, "metadata schema loaded");
                policy
            }
            None => {
                tracing::info!("using bundled metadata schema");
                SchemaPolicy::bundled()?
            }
        };

        Ok(Self {
            fetcher: Arc::new(HttpResourceFetcher::new(config.http_timeout_secs)?),
            resolver: Arc::new(KeyDidResolver::new()),
            revocation: Arc::new(BitstringStatusList::new()),
            issuer_policy,
            schema_policy,
            ledger_timeout_secs: config.http_timeout_secs,
        })
    }
}
