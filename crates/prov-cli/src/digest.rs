//! # `prov digest` — compute a content digest
//!
//! The same BLAKE3-256 computation the pipeline uses, exposed for the
//! mint-side workflow: authors need the digest before the record exists.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use prov_core::blake3_digest;

/// Arguments for `prov digest`.
#[derive(Args, Debug)]
pub struct DigestArgs {
    /// Path of the file to hash.
    #[arg(long)]
    pub file: PathBuf,
}

/// Print the 0x-prefixed BLAKE3-256 digest of a file.
pub fn run_digest(args: &DigestArgs) -> anyhow::Result<u8> {
    let content = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    println!("{}", blake3_digest(&content).to_prefixed_hex());
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_of_file_matches_direct_computation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.bin");
        std::fs::write(&path, b"digest me").unwrap();

        let args = DigestArgs { file: path };
        assert_eq!(run_digest(&args).unwrap(), 0);
    }

    #[test]
    fn missing_file_is_an_error() {
        let args = DigestArgs {
            file: PathBuf::from("/no/such/file.bin"),
        };
        assert!(run_digest(&args).is_err());
    }
}
