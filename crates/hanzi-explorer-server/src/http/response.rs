// SPDX-License-Identifier: Apache-2.0

use axum::http::header::{ETAG, IF_NONE_MATCH};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use hanzi_explorer_api::{map_error, ApiError};
use hanzi_explorer_core::canonical::entity_tag;
use hanzi_explorer_ingest::IngestError;
use hanzi_explorer_query::QueryError;
use hanzi_explorer_store::{MutationError, StoreError};
use serde::Serialize;

/// Handler-side error. The body is rendered here with a placeholder request
/// id; the tracing middleware re-renders it with the real one.
#[derive(Debug)]
pub(crate) struct ApiFailure(pub(crate) ApiError);

pub(crate) type HandlerResult = Result<Response, ApiFailure>;

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(map_error(&self.0).status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(&self.0)).into_response();
        response.extensions_mut().insert(self.0);
        response
    }
}

impl From<ApiError> for ApiFailure {
    fn from(value: ApiError) -> Self {
        Self(value)
    }
}

impl From<StoreError> for ApiFailure {
    fn from(value: StoreError) -> Self {
        Self(value.into())
    }
}

impl From<MutationError> for ApiFailure {
    fn from(value: MutationError) -> Self {
        Self(value.into())
    }
}

impl From<QueryError> for ApiFailure {
    fn from(value: QueryError) -> Self {
        Self(value.into())
    }
}

impl From<IngestError> for ApiFailure {
    fn from(value: IngestError) -> Self {
        Self(value.into())
    }
}

fn etag_matches(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get_all(IF_NONE_MATCH)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|candidate| candidate.trim().trim_start_matches("W/"))
        .any(|candidate| candidate == "*" || candidate == etag)
}

/// JSON response carrying a strong `ETag`; `304` when the client already
/// holds the same representation.
pub(crate) fn tagged_json<T: Serialize>(headers: &HeaderMap, value: &T) -> HandlerResult {
    let etag = entity_tag(value).map_err(|e| ApiError::internal(format!("encode etag: {e}")))?;
    let header = HeaderValue::from_str(&etag)
        .map_err(|e| ApiError::internal(format!("etag header: {e}")))?;
    let mut response = if etag_matches(headers, &etag) {
        StatusCode::NOT_MODIFIED.into_response()
    } else {
        Json(value).into_response()
    };
    response.headers_mut().insert(ETAG, header);
    Ok(response)
}

pub(crate) fn created<T: Serialize>(value: &T) -> Response {
    (StatusCode::CREATED, Json(value)).into_response()
}

pub(crate) fn ok_json<T: Serialize>(value: &T) -> Response {
    Json(value).into_response()
}

pub(crate) fn parse_id(name: &str, raw: &str) -> Result<i64, ApiFailure> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiFailure(ApiError::invalid_param(name, raw)))
}
