//! # EVM JSON-RPC Record Reader
//!
//! Production [`RecordReader`](crate::RecordReader) that reads provenance
//! records from an EVM registry contract via JSON-RPC `eth_call`.
//!
//! ## How It Works
//!
//! 1. Calldata is the runtime-computed `getRecord(uint256)` selector plus
//!    the 32-byte token identifier ([`crate::abi`]).
//! 2. The call goes to the endpoint as
//!    `eth_call [{to, data}, "latest"]` — a read-only call, no transaction,
//!    no keys.
//! 3. The hex result is ABI-decoded into a
//!    [`ProvenanceRecord`](prov_core::ProvenanceRecord).
//!
//! ## Failure Semantics
//!
//! Fail closed, no retries: transport errors, JSON-RPC error objects
//! (including reverts for unknown tokens), missing results, and undecodable
//! return data all surface as [`LedgerError`]. Retry policy belongs to the
//! caller.

use std::time::Duration;

use async_trait::async_trait;

use prov_core::{record::is_valid_eth_address, ProvenanceRecord, TokenId};

use crate::abi::{decode_get_record_return, encode_get_record_call};
use crate::error::LedgerError;
use crate::RecordReader;

/// Configuration for the EVM record reader.
#[derive(Debug, Clone)]
pub struct EvmLedgerConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Registry contract address (0x-prefixed, 40 hex chars).
    pub contract_address: String,
    /// Request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl EvmLedgerConfig {
    /// Create a configuration with the default timeout.
    pub fn new(rpc_url: impl Into<String>, contract_address: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            contract_address: contract_address.into(),
            timeout_secs: 30,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// EVM JSON-RPC implementation of [`RecordReader`].
#[derive(Debug)]
pub struct EvmRecordReader {
    client: reqwest::Client,
    config: EvmLedgerConfig,
}

impl EvmRecordReader {
    /// Create a new reader from configuration.
    pub fn new(config: EvmLedgerConfig) -> Result<Self, LedgerError> {
        if !is_valid_eth_address(&config.contract_address) {
            return Err(LedgerError::Config(format!(
                "invalid contract address: {}",
                config.contract_address
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LedgerError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Send a JSON-RPC request and return the `result` field.
    async fn rpc_call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, LedgerError> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        let resp = self
            .client
            .post(&self.config.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LedgerError::Timeout
                } else {
                    LedgerError::Transport {
                        reason: e.to_string(),
                    }
                }
            })?;

        if !resp.status().is_success() {
            return Err(LedgerError::Transport {
                reason: format!("HTTP {}", resp.status()),
            });
        }

        let json: serde_json::Value = resp.json().await.map_err(|e| LedgerError::Transport {
            reason: format!("invalid JSON response: {e}"),
        })?;

        if let Some(error) = json.get("error") {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown RPC error")
                .to_string();
            return Err(LedgerError::Rpc { message });
        }

        json.get("result")
            .filter(|r| !r.is_null())
            .cloned()
            .ok_or(LedgerError::MissingResult)
    }
}

#[async_trait]
impl RecordReader for EvmRecordReader {
    async fn get_record(&self, token_id: &TokenId) -> Result<ProvenanceRecord, LedgerError> {
        let data = encode_get_record_call(token_id);
        tracing::debug!(
            contract = %self.config.contract_address,
            token = %token_id,
            "reading provenance record"
        );

        let call = serde_json::json!({
            "to": self.config.contract_address,
            "data": data,
        });
        let result = self
            .rpc_call("eth_call", serde_json::json!([call, "latest"]))
            .await?;

        let hex = result.as_str().ok_or_else(|| LedgerError::Decode(
            "eth_call returned non-string result".to_string(),
        ))?;
        decode_get_record_return(hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = EvmLedgerConfig::new(
            "https://rpc.example.com",
            "0x0000000000000000000000000000000000000001",
        );
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_with_timeout() {
        let config = EvmLedgerConfig::new(
            "https://rpc.example.com",
            "0x0000000000000000000000000000000000000001",
        )
        .with_timeout(5);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn reader_rejects_invalid_contract_address() {
        let config = EvmLedgerConfig::new("https://rpc.example.com", "not-an-address");
        assert!(matches!(
            EvmRecordReader::new(config),
            Err(LedgerError::Config(_))
        ));
    }

    #[test]
    fn reader_builds_with_valid_config() {
        let config = EvmLedgerConfig::new(
            "https://rpc.example.com",
            "0x0000000000000000000000000000000000000001",
        );
        let reader = EvmRecordReader::new(config);
        assert!(reader.is_ok());
    }
}
