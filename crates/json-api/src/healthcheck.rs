//! Liveness check for load balancers and orchestrators.

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Liveness report.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process accepts requests
    pub status: String,

    /// Running `storefront-json` build
    pub version: String,
}

/// Healthcheck handler
///
/// Answers without touching the database so a slow pool never marks the
/// process dead.
#[endpoint(tags("health"), summary = "Liveness check")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
