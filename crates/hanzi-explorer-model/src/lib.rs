// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Catalog model SSOT: persisted records, mutation drafts, read views and the
//! legacy JSON document used for bulk import/export.

mod document;
mod draft;
mod entity;
mod snapshot;
mod view;

pub use document::{ImportDocument, ImportEntry, KeywordList};
pub use draft::{
    CharacterDraft, FieldError, KeywordDraft, NewUser, PrimitiveDraft, ValidationError,
    EMAIL_MAX_LEN, HANZI_MAX_CHARS, KEYWORD_MAX_LEN, PASSWORD_MIN_LEN, PINYIN_MAX_LEN,
    PRIMITIVE_NAME_MAX_LEN, STROKES_MAX, SYMBOL_MAX_CHARS, USERNAME_MAX_LEN, USERNAME_MIN_LEN,
};
pub use entity::{
    Character, CharacterId, Keyword, KeywordId, KeywordLink, PrimitiveLink, Primitive,
    PrimitiveId, User, UserId,
};
pub use snapshot::CatalogSnapshot;
pub use view::{
    CatalogCounts, ChapterEntry, CharacterRef, CharacterView, GraphData, GraphEdge, GraphNode,
    Metadata, NodeKind, PrimitiveDetail, PrimitiveRef, VolumeEntry,
};

pub const CRATE_NAME: &str = "hanzi-explorer-model";

/// Stable node identifier for a character in graph output.
#[must_use]
pub fn character_node_id(id: CharacterId) -> String {
    format!("c_{id}")
}

/// Stable node identifier for a primitive in graph output.
#[must_use]
pub fn primitive_node_id(id: PrimitiveId) -> String {
    format!("p_{id}")
}
