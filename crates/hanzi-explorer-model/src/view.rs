// SPDX-License-Identifier: Apache-2.0

use crate::entity::{CharacterId, Primitive, PrimitiveId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimitiveRef {
    pub id: PrimitiveId,
    pub name: String,
    pub symbol: String,
    pub meaning: Option<String>,
}

/// A character joined with its keywords and primitives, in listing order.
/// `keyword` is the first entry of `keywords`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterView {
    pub id: CharacterId,
    pub hanzi: String,
    pub heisig_index: i64,
    pub keyword: Option<String>,
    pub keywords: Vec<String>,
    pub story: Option<String>,
    pub strokes: Option<i64>,
    pub pinyin: Option<String>,
    pub traditional: Option<String>,
    pub volume: Option<i64>,
    pub chapter: Option<i64>,
    pub primitives: Vec<PrimitiveRef>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRef {
    pub id: CharacterId,
    pub hanzi: String,
    pub heisig_index: i64,
    pub keyword: Option<String>,
}

/// A primitive with the characters that use it, derived from the join table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimitiveDetail {
    #[serde(flatten)]
    pub primitive: Primitive,
    pub characters: Vec<CharacterRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterEntry {
    pub number: i64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeEntry {
    pub number: i64,
    pub title: String,
    pub chapters: Vec<ChapterEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub volumes: Vec<VolumeEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Character,
    Primitive,
}

impl NodeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Primitive => "primitive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub label: String,
    pub title: String,
    pub entity_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heisig_index: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    #[serde(default)]
    pub skipped_edges: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCounts {
    pub characters: u64,
    pub primitives: u64,
    pub keywords: u64,
    pub users: u64,
}
