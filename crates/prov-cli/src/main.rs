//! # prov CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//!
//! Exit codes: 0 = verified, 2 = verification failed, 1 = infrastructure
//! failure, 64 = usage error. Usage errors are distinct from verification
//! failures so scripts can tell "you called me wrong" from "the content is
//! bad".

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use prov_cli::digest::{run_digest, DigestArgs};
use prov_cli::verify::{run_verify, VerifyArgs};

/// Provenance Stack CLI
///
/// Verifies content files against on-chain provenance records: BLAKE3
/// digest binding, author detached signatures, metadata schema, and
/// optional Verifiable Credentials with status-list revocation.
#[derive(Parser, Debug)]
#[command(name = "prov", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify a file against an on-chain provenance record.
    Verify(VerifyArgs),

    /// Compute the BLAKE3-256 digest of a file.
    Digest(DigestArgs),
}

const USAGE_EXIT: u8 = 64;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version are successful outcomes, not usage errors.
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => USAGE_EXIT,
            };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Verify(args) => run_verify(&args),
        Commands::Digest(args) => run_digest(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn cli_parse_verify_full() {
        let cli = Cli::try_parse_from([
            "prov",
            "verify",
            "--rpc",
            "https://rpc.example.com",
            "--contract",
            "0x00000000000000000000000000000000000000a1",
            "--token",
            "42",
            "--file",
            "content.bin",
        ])
        .unwrap();
        match cli.command {
            Commands::Verify(args) => {
                assert_eq!(args.rpc, "https://rpc.example.com");
                assert_eq!(args.token, "42");
                assert_eq!(args.file, PathBuf::from("content.bin"));
                assert!(args.allowed_issuers.is_none());
                assert!(args.schema.is_none());
                assert!(!args.no_schema);
                assert_eq!(args.timeout, 30);
            }
            other => panic!("expected Verify, got: {other:?}"),
        }
    }

    #[test]
    fn cli_parse_verify_with_policies() {
        let cli = Cli::try_parse_from([
            "prov",
            "verify",
            "--rpc",
            "https://rpc.example.com",
            "--contract",
            "0x00000000000000000000000000000000000000a1",
            "--token",
            "0xff",
            "--file",
            "content.bin",
            "--allowed-issuers",
            "allowedIssuers.json",
            "--schema",
            "metadata.schema.json",
            "--timeout",
            "10",
        ])
        .unwrap();
        if let Commands::Verify(args) = cli.command {
            assert_eq!(
                args.allowed_issuers,
                Some(PathBuf::from("allowedIssuers.json"))
            );
            assert_eq!(args.schema, Some(PathBuf::from("metadata.schema.json")));
            assert_eq!(args.timeout, 10);
        }
    }

    #[test]
    fn cli_parse_no_schema_conflicts_with_schema() {
        let result = Cli::try_parse_from([
            "prov",
            "verify",
            "--rpc",
            "r",
            "--contract",
            "c",
            "--token",
            "1",
            "--file",
            "f",
            "--schema",
            "s.json",
            "--no-schema",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_digest() {
        let cli = Cli::try_parse_from(["prov", "digest", "--file", "content.bin"]).unwrap();
        assert!(matches!(cli.command, Commands::Digest(_)));
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli = Cli::try_parse_from(["prov", "-vv", "digest", "--file", "x"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_parse_missing_required_args_errors() {
        let result = Cli::try_parse_from(["prov", "verify", "--rpc", "r"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["prov"]).is_err());
    }

    #[test]
    fn cli_parse_unknown_subcommand_errors() {
        assert!(Cli::try_parse_from(["prov", "mint"]).is_err());
    }
}
