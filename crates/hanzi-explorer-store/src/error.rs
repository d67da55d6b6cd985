// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    NotFound,
    DuplicateKey,
    Validation,
    Backend,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::DuplicateKey => "duplicate_key",
            Self::Validation => "validation",
            Self::Backend => "backend",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
    pub field: Option<String>,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    #[must_use]
    pub fn not_found(entity: &str, key: impl Display) -> Self {
        Self::new(StoreErrorCode::NotFound, format!("{entity} {key} not found"))
    }

    #[must_use]
    pub fn duplicate(entity: &str, field: &str, value: impl Display) -> Self {
        Self {
            code: StoreErrorCode::DuplicateKey,
            message: format!("{entity}.{field} '{value}' already exists"),
            field: Some(field.to_string()),
        }
    }

    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::Backend, message)
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(err, Some(msg)) = &value {
            match err.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    // "UNIQUE constraint failed: characters.hanzi"
                    let column = msg.rsplit(':').next().unwrap_or_default().trim();
                    let (table, field) = column.split_once('.').unwrap_or(("", column));
                    let field = field.split(',').next().unwrap_or(field).trim();
                    return Self {
                        code: StoreErrorCode::DuplicateKey,
                        message: format!("{table}.{field} already exists"),
                        field: Some(field.to_string()),
                    };
                }
                rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
                | rusqlite::ffi::SQLITE_CONSTRAINT_CHECK
                | rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL => {
                    return Self::new(StoreErrorCode::Validation, msg.clone());
                }
                _ => {}
            }
        }
        Self::backend(value.to_string())
    }
}
