//! # Route Handlers

pub mod verify;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Assemble the route table.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/verify", post(verify::handle_verify))
        .route("/healthz", get(healthz))
}

/// Liveness probe.
async fn healthz() -> &'static str {
    "ok"
}
