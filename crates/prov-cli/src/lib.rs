//! # prov-cli — Verification CLI
//!
//! Subcommand handlers for the `prov` binary. Each handler returns the
//! process exit code on success and `anyhow::Error` for infrastructure
//! failures, keeping the exit-code contract in one place:
//!
//! | Code | Meaning                       |
//! |------|-------------------------------|
//! | 0    | Verification succeeded        |
//! | 2    | Verification failed (verdict) |
//! | 1    | Infrastructure failure        |
//! | 64   | Usage error                   |

pub mod digest;
pub mod verify;
