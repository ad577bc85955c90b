//! # POST /verify
//!
//! Accepts a multipart form with a `file` part (the content bytes) and
//! `rpc`, `contract`, `token` text fields, runs the verification pipeline,
//! and returns the verdict as JSON.
//!
//! Both `ok: true` and `ok: false` verdicts are 200 responses — a failed
//! verification is an answer, not an error. Missing or malformed request
//! parts are 422; pipeline infrastructure failures are 502.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;

use prov_core::{TokenId, TokenRef};
use prov_ledger::{EvmLedgerConfig, EvmRecordReader};
use prov_pipeline::{VerificationPipeline, VerificationResult};
use prov_vc::CredentialVerifier;

use crate::error::ApiError;
use crate::state::AppState;

/// POST /verify — verify an uploaded file against an on-chain record.
pub async fn handle_verify(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<VerificationResult>, ApiError> {
    let mut file: Option<Vec<u8>> = None;
    let mut rpc: Option<String> = None;
    let mut contract: Option<String> = None;
    let mut token: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("unreadable file part: {e}")))?;
                file = Some(bytes.to_vec());
            }
            Some("rpc") => rpc = Some(read_text_field(field).await?),
            Some("contract") => contract = Some(read_text_field(field).await?),
            Some("token") => token = Some(read_text_field(field).await?),
            // Unknown parts are ignored, matching lenient form handling.
            _ => {}
        }
    }

    let file = file.ok_or_else(|| ApiError::BadRequest("missing file part".to_string()))?;
    let rpc = rpc.ok_or_else(|| ApiError::BadRequest("missing rpc field".to_string()))?;
    let contract =
        contract.ok_or_else(|| ApiError::BadRequest("missing contract field".to_string()))?;
    let token =
        token.ok_or_else(|| ApiError::BadRequest("missing token field".to_string()))?;

    let token_id: TokenId = token
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("invalid token identifier: {e}")))?;
    let token_ref = TokenRef::new(contract.clone(), token_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    // The ledger reader is per-request: the caller names the RPC endpoint
    // and contract; everything else is shared process state.
    let reader = EvmRecordReader::new(
        EvmLedgerConfig::new(rpc, contract).with_timeout(state.ledger_timeout_secs),
    )
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let pipeline = VerificationPipeline::new(
        Arc::new(reader),
        state.fetcher.clone(),
        CredentialVerifier::new(state.resolver.clone()),
        state.revocation.clone(),
        state.issuer_policy.clone(),
        state.schema_policy.clone(),
    );

    let result = pipeline.verify(&file, &token_ref).await?;
    tracing::info!(
        token = %token_ref.token_id,
        ok = result.ok,
        reason = result.reason.as_deref().unwrap_or(""),
        "verification complete"
    );
    Ok(Json(result))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    let name = field.name().unwrap_or("<unnamed>").to_string();
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("unreadable {name} field: {e}")))
}
