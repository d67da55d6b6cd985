// SPDX-License-Identifier: Apache-2.0

use hanzi_explorer_store::{StoreError, StoreErrorCode};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// The document could not be read or violates its own invariants.
    /// Nothing has been written.
    Malformed(String),
    /// Characters already present in the store; lists every colliding glyph.
    DuplicateKey { glyphs: Vec<String> },
    Io(String),
    Store(StoreError),
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(msg) => write!(f, "malformed import document: {msg}"),
            Self::DuplicateKey { glyphs } => {
                write!(f, "characters already exist: {}", glyphs.join(", "))
            }
            Self::Io(msg) => write!(f, "import io error: {msg}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for IngestError {}

impl From<StoreError> for IngestError {
    fn from(value: StoreError) -> Self {
        if value.code == StoreErrorCode::DuplicateKey {
            return Self::DuplicateKey {
                glyphs: Vec::new(),
            };
        }
        Self::Store(value)
    }
}
