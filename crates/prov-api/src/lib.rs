//! # prov-api — Verification Service
//!
//! Axum service exposing the verification pipeline over HTTP.
//!
//! ## API Surface
//!
//! | Route           | Method | Purpose                                    |
//! |-----------------|--------|--------------------------------------------|
//! | `/verify`       | POST   | Verify an uploaded file against a record   |
//! | `/healthz`      | GET    | Liveness probe                             |
//!
//! ## Status Mapping
//!
//! | Outcome                         | Status |
//! |---------------------------------|--------|
//! | Verdict (`ok: true` or `false`) | 200    |
//! | Missing/invalid request parts   | 422    |
//! | Ledger/fetch infrastructure     | 502    |
//! | Anything else                   | 500    |

pub mod error;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::{ApiConfig, AppState};

/// Assemble the application router.
///
/// Body limit: 64 MiB — verification uploads are whole content files, not
/// JSON envelopes.
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(DefaultBodyLimit::max(64 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
