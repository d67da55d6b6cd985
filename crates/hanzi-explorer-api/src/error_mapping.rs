// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, ApiErrorCode};
use hanzi_explorer_ingest::IngestError;
use hanzi_explorer_model::FieldError;
use hanzi_explorer_query::{QueryError, QueryErrorCode};
use hanzi_explorer_store::{MutationError, StoreError, StoreErrorCode};

pub const API_ERROR_SCHEMA_REF: &str = "#/components/schemas/ApiError";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiErrorMapping {
    pub status_code: u16,
    pub schema_ref: &'static str,
}

#[must_use]
pub fn map_error(error: &ApiError) -> ApiErrorMapping {
    let status_code = match error.code {
        ApiErrorCode::InvalidQueryParameter
        | ApiErrorCode::ValidationFailed
        | ApiErrorCode::MalformedImport => 400,
        ApiErrorCode::Unauthorized => 401,
        ApiErrorCode::Forbidden => 403,
        ApiErrorCode::NotFound => 404,
        ApiErrorCode::DuplicateKey => 409,
        ApiErrorCode::PayloadTooLarge => 413,
        ApiErrorCode::StoreUnavailable => 503,
        _ => 500,
    };
    ApiErrorMapping {
        status_code,
        schema_ref: API_ERROR_SCHEMA_REF,
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        match value.code {
            StoreErrorCode::NotFound => Self::not_found(value.message),
            StoreErrorCode::DuplicateKey => Self::duplicate_key(&[FieldError::new(
                value.field.unwrap_or_else(|| "key".to_string()),
                "already exists",
            )]),
            StoreErrorCode::Validation => Self::validation_failed(&[FieldError::new(
                value.field.unwrap_or_else(|| "body".to_string()),
                value.message,
            )]),
            _ => Self::store_unavailable(value.message),
        }
    }
}

impl From<MutationError> for ApiError {
    fn from(value: MutationError) -> Self {
        match value {
            MutationError::NotFound { entity, key } => {
                let mut entity = entity.to_string();
                if let Some(first) = entity.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                Self::not_found(format!("{entity} not found")).with_detail_key(&key)
            }
            MutationError::DuplicateKey { fields } => Self::duplicate_key(&fields),
            MutationError::Validation { fields } => Self::validation_failed(&fields),
            MutationError::Store(err) => err.into(),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(value: QueryError) -> Self {
        match value.code {
            QueryErrorCode::NotFound => Self::not_found(value.message),
            _ => Self::new(
                ApiErrorCode::InvalidQueryParameter,
                value.message,
                serde_json::json!({}),
            ),
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(value: IngestError) -> Self {
        match value {
            IngestError::Malformed(reason) => Self::malformed_import(&reason),
            IngestError::DuplicateKey { glyphs } => Self::duplicate_glyphs(&glyphs),
            IngestError::Io(reason) => Self::internal(reason),
            IngestError::Store(err) => err.into(),
        }
    }
}

impl ApiError {
    fn with_detail_key(mut self, key: &str) -> Self {
        self.details = serde_json::json!({"key": key});
        self
    }
}
