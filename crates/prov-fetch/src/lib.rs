//! # prov-fetch — Resource Fetching
//!
//! The pipeline resolves metadata documents, credentials, and status lists
//! through the [`ResourceFetcher`] trait. The shipped implementation,
//! [`HttpResourceFetcher`], speaks HTTP(S) only and rejects every other
//! scheme **before any I/O** — a bare `ipfs://` identifier without a
//! gateway must fail fast with an explicit error rather than hang or fall
//! through to DNS.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors from resource fetching.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URI uses a scheme this fetcher cannot resolve (e.g. a raw
    /// content-addressed identifier without a gateway).
    #[error("unsupported URI scheme {scheme:?} in {uri} — provide an HTTP(S) gateway URL")]
    UnsupportedScheme {
        /// The rejected scheme.
        scheme: String,
        /// The full URI as given.
        uri: String,
    },

    /// The URI could not be parsed at all.
    #[error("invalid URI {uri}: {reason}")]
    InvalidUri {
        /// The unparseable URI.
        uri: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// Transport-level failure (connect, TLS, timeout).
    #[error("fetch of {uri} failed: {reason}")]
    Transport {
        /// The URI being fetched.
        uri: String,
        /// Human-readable transport failure description.
        reason: String,
    },

    /// The server answered with a non-success status.
    #[error("fetch of {uri} returned HTTP {status}")]
    Status {
        /// The URI being fetched.
        uri: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body was not valid JSON.
    #[error("response from {uri} is not valid JSON: {reason}")]
    Decode {
        /// The URI being fetched.
        uri: String,
        /// Decoder diagnostic.
        reason: String,
    },

    /// The fetcher could not be constructed.
    #[error("fetcher configuration error: {0}")]
    Config(String),
}

/// Resolves a URI to a parsed JSON document.
///
/// Implementations must reject schemes they cannot resolve with
/// [`FetchError::UnsupportedScheme`] instead of guessing.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch and parse the document at `uri`.
    async fn fetch_json(&self, uri: &str) -> Result<Value, FetchError>;
}

/// HTTP(S) implementation of [`ResourceFetcher`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpResourceFetcher {
    client: reqwest::Client,
}

impl HttpResourceFetcher {
    /// Create a fetcher with the given per-request timeout.
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FetchError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ResourceFetcher for HttpResourceFetcher {
    async fn fetch_json(&self, uri: &str) -> Result<Value, FetchError> {
        let parsed = url::Url::parse(uri).map_err(|e| FetchError::InvalidUri {
            uri: uri.to_string(),
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(FetchError::UnsupportedScheme {
                    scheme: other.to_string(),
                    uri: uri.to_string(),
                });
            }
        }

        tracing::debug!(%uri, "fetching resource");
        let resp = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                uri: uri.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                uri: uri.to_string(),
                status: status.as_u16(),
            });
        }

        resp.json().await.map_err(|e| FetchError::Decode {
            uri: uri.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> HttpResourceFetcher {
        HttpResourceFetcher::new(5).expect("fetcher build")
    }

    #[tokio::test]
    async fn ipfs_scheme_rejected_before_io() {
        let result = fetcher()
            .fetch_json("ipfs://bafybeigdyrzt5examplecid/metadata.json")
            .await;
        match result {
            Err(FetchError::UnsupportedScheme { scheme, .. }) => assert_eq!(scheme, "ipfs"),
            other => panic!("expected UnsupportedScheme, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn file_scheme_rejected() {
        let result = fetcher().fetch_json("file:///etc/passwd").await;
        assert!(matches!(
            result,
            Err(FetchError::UnsupportedScheme { .. })
        ));
    }

    #[tokio::test]
    async fn garbage_uri_rejected() {
        let result = fetcher().fetch_json("not a uri at all").await;
        assert!(matches!(result, Err(FetchError::InvalidUri { .. })));
    }

    #[test]
    fn unsupported_scheme_display_names_gateway() {
        let err = FetchError::UnsupportedScheme {
            scheme: "ipfs".to_string(),
            uri: "ipfs://cid".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("ipfs"));
        assert!(msg.contains("gateway"));
    }
}
