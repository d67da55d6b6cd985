// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

pub type CharacterId = i64;
pub type PrimitiveId = i64;
pub type KeywordId = i64;
pub type UserId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub hanzi: String,
    pub heisig_index: i64,
    pub story: Option<String>,
    pub strokes: Option<i64>,
    pub pinyin: Option<String>,
    pub traditional: Option<String>,
    pub volume: Option<i64>,
    pub chapter: Option<i64>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Primitive {
    pub id: PrimitiveId,
    pub name: String,
    pub symbol: String,
    pub meaning: Option<String>,
    pub notes: Option<String>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub id: KeywordId,
    pub word: String,
    pub notes: Option<String>,
    pub created_at_ms: i64,
}

/// Administrative account. The password hash never leaves the process in
/// serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub registered_at_ms: i64,
}

/// One row of the character/primitive join table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimitiveLink {
    pub character_id: CharacterId,
    pub primitive_id: PrimitiveId,
    pub position: i64,
}

/// One row of the character/keyword join table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordLink {
    pub character_id: CharacterId,
    pub keyword_id: KeywordId,
    pub position: i64,
}
