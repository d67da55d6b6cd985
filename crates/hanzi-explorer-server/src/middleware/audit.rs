// SPDX-License-Identifier: Apache-2.0

use super::RequestId;
use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use hanzi_explorer_api::UNKNOWN_REQUEST_ID;
use std::time::Instant;

pub(crate) const AUDIT_TARGET: &str = "hanzi_audit";

pub(crate) async fn audit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !state.config.enable_audit_log {
        return next.run(request).await;
    }
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map_or_else(|| UNKNOWN_REQUEST_ID.to_string(), |id| id.0.clone());
    let response = next.run(request).await;
    tracing::info!(
        target: AUDIT_TARGET,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        request_id = %request_id,
        latency_ms = started.elapsed().as_millis() as u64,
        "audit"
    );
    response
}
