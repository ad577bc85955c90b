//! # `prov verify` — verify a file against an on-chain record

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;

use prov_core::{TokenId, TokenRef};
use prov_fetch::HttpResourceFetcher;
use prov_ledger::{EvmLedgerConfig, EvmRecordReader};
use prov_pipeline::{IssuerPolicy, SchemaPolicy, VerificationPipeline};
use prov_vc::{BitstringStatusList, CredentialVerifier, KeyDidResolver};

/// Arguments for `prov verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// JSON-RPC endpoint of the ledger.
    #[arg(long)]
    pub rpc: String,

    /// Registry contract address (0x-prefixed).
    #[arg(long)]
    pub contract: String,

    /// Token identifier (decimal or 0x-hex).
    #[arg(long)]
    pub token: String,

    /// Path of the content file to verify.
    #[arg(long)]
    pub file: PathBuf,

    /// Issuer allow-list document ({"issuers": ["did:…"]}).
    #[arg(long)]
    pub allowed_issuers: Option<PathBuf>,

    /// Metadata schema file overriding the bundled schema.
    #[arg(long, conflicts_with = "no_schema")]
    pub schema: Option<PathBuf>,

    /// Disable metadata schema validation.
    #[arg(long)]
    pub no_schema: bool,

    /// Outbound HTTP timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

/// Run a verification and print the verdict JSON to stdout.
///
/// Returns exit code 0 for a successful verdict and 2 for a failed one;
/// infrastructure failures propagate as errors (exit 1 in main).
pub fn run_verify(args: &VerifyArgs) -> anyhow::Result<u8> {
    let content = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let token_id: TokenId = args
        .token
        .parse()
        .with_context(|| format!("invalid token identifier {:?}", args.token))?;
    let token = TokenRef::new(args.contract.clone(), token_id)?;

    let issuer_policy = match &args.allowed_issuers {
        Some(path) => {
            let policy = IssuerPolicy::from_file(path)?;
            tracing::info!(
                path = %path.display(),
                restricted = policy.is_restricted(),
                "issuer allow-list loaded"
            );
            policy
        }
        None => IssuerPolicy::Unrestricted,
    };

    let schema_policy = if args.no_schema {
        tracing::warn!("metadata schema validation disabled");
        SchemaPolicy::Skip
    } else {
        match &args.schema {
            Some(path) => SchemaPolicy::from_file(path)?,
            None => SchemaPolicy::bundled()?,
        }
    };

    let reader = EvmRecordReader::new(
        EvmLedgerConfig::new(args.rpc.clone(), args.contract.clone())
            .with_timeout(args.timeout),
    )?;
    let pipeline = VerificationPipeline::new(
        Arc::new(reader),
        Arc::new(HttpResourceFetcher::new(args.timeout)?),
        CredentialVerifier::new(Arc::new(KeyDidResolver::new())),
        Arc::new(BitstringStatusList::new()),
        issuer_policy,
        schema_policy,
    );

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let result = runtime.block_on(pipeline.verify(&content, &token))?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(if result.ok { 0 } else { 2 })
}
