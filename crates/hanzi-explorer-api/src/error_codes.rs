// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    InvalidQueryParameter,
    ValidationFailed,
    MalformedImport,
    Unauthorized,
    Forbidden,
    NotFound,
    DuplicateKey,
    PayloadTooLarge,
    Internal,
    StoreUnavailable,
}

pub const API_ERROR_CODES: [&str; 10] = [
    "InvalidQueryParameter",
    "ValidationFailed",
    "MalformedImport",
    "Unauthorized",
    "Forbidden",
    "NotFound",
    "DuplicateKey",
    "PayloadTooLarge",
    "Internal",
    "StoreUnavailable",
];

impl ApiErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidQueryParameter => "InvalidQueryParameter",
            Self::ValidationFailed => "ValidationFailed",
            Self::MalformedImport => "MalformedImport",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "NotFound",
            Self::DuplicateKey => "DuplicateKey",
            Self::PayloadTooLarge => "PayloadTooLarge",
            Self::Internal => "Internal",
            Self::StoreUnavailable => "StoreUnavailable",
        }
    }
}
