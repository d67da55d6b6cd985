// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use hanzi_explorer_api::ApiError;
use tracing::Instrument;

pub(crate) const REQUEST_ID_HEADER: &str = "x-request-id";
const MAX_REQUEST_ID_LEN: usize = 128;

/// Request id assigned by the tracing middleware, visible to inner layers.
#[derive(Debug, Clone)]
pub(crate) struct RequestId(pub(crate) String);

fn inbound_request_id(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(REQUEST_ID_HEADER)?.to_str().ok()?.trim();
    let acceptable = !raw.is_empty()
        && raw.len() <= MAX_REQUEST_ID_LEN
        && raw.chars().all(|c| c.is_ascii_graphic());
    acceptable.then(|| raw.to_string())
}

/// Error bodies are produced before the request id is known to the handler;
/// stamp the id into them here.
fn stamp_error_body(response: &mut Response, request_id: &str) {
    let Some(error) = response.extensions_mut().remove::<ApiError>() else {
        return;
    };
    if response.status().is_server_error() {
        tracing::warn!(code = error.code.as_str(), message = %error.message, "request failed");
    }
    let error = error.with_request_id(request_id);
    if let Ok(bytes) = serde_json::to_vec(&error) {
        *response.body_mut() = Body::from(bytes);
    }
}

pub(crate) async fn request_tracing_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let request_id =
        inbound_request_id(request.headers()).unwrap_or_else(|| state.next_request_id());
    let method = request.method().to_string();
    let route = request.uri().path().to_string();
    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let span = tracing::info_span!(
        "http.request",
        request_id = %request_id,
        method = %method,
        route = %route,
    );

    let mut response = next.run(request).instrument(span).await;
    stamp_error_body(&mut response, &request_id);
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
