// SPDX-License-Identifier: Apache-2.0

use crate::ApiErrorCode;
use hanzi_explorer_model::FieldError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const UNKNOWN_REQUEST_ID: &str = "req-unknown";

/// Error body returned by every endpoint. `error` carries the
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    #[serde(rename = "error")]
    pub message: String,
    pub code: ApiErrorCode,
    pub details: Value,
    pub request_id: String,
}

fn field_errors_json(fields: &[FieldError]) -> Value {
    Value::Array(
        fields
            .iter()
            .map(|f| json!({"field": f.field, "reason": f.reason}))
            .collect(),
    )
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            message: message.into(),
            code,
            details,
            request_id: UNKNOWN_REQUEST_ID.to_string(),
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    #[must_use]
    pub fn invalid_param(name: &str, value: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidQueryParameter,
            format!("invalid query parameter: {name}"),
            json!({"field_errors":[{"parameter": name, "reason": "invalid", "value": value}]}),
        )
    }

    #[must_use]
    pub fn validation_failed(fields: &[FieldError]) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            "validation failed",
            json!({"field_errors": field_errors_json(fields)}),
        )
    }

    #[must_use]
    pub fn invalid_body(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            "invalid request body",
            json!({"field_errors": [{"field": "body", "reason": reason}]}),
        )
    }

    #[must_use]
    pub fn duplicate_key(fields: &[FieldError]) -> Self {
        Self::new(
            ApiErrorCode::DuplicateKey,
            "duplicate key",
            json!({"field_errors": field_errors_json(fields)}),
        )
    }

    #[must_use]
    pub fn duplicate_glyphs(glyphs: &[String]) -> Self {
        Self::new(
            ApiErrorCode::DuplicateKey,
            "characters already exist",
            json!({"glyphs": glyphs}),
        )
    }

    #[must_use]
    pub fn malformed_import(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::MalformedImport,
            "malformed import document",
            json!({"reason": reason}),
        )
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::NotFound, message, json!({}))
    }

    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(ApiErrorCode::Unauthorized, "authentication required", json!({}))
    }

    #[must_use]
    pub fn invalid_credentials() -> Self {
        Self::new(ApiErrorCode::Unauthorized, "invalid username or password", json!({}))
    }

    #[must_use]
    pub fn forbidden() -> Self {
        Self::new(ApiErrorCode::Forbidden, "admin privileges required", json!({}))
    }

    #[must_use]
    pub fn payload_too_large(limit_bytes: usize) -> Self {
        Self::new(
            ApiErrorCode::PayloadTooLarge,
            "request body too large",
            json!({"limit_bytes": limit_bytes}),
        )
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Internal, message, json!({}))
    }

    #[must_use]
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::StoreUnavailable, message, json!({}))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}
