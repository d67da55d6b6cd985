// SPDX-License-Identifier: Apache-2.0

//! Legacy JSON catalog document used for bulk import and export.
//!
//! Older catalog files name the glyph `character` and the index
//! `frame_number`; newer ones use `hanzi` and `heisig_index`. Both spellings
//! are accepted, export always writes the first.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDocument {
    pub characters: Vec<ImportEntry>,
}

/// `keywords` may be given as a list, or as a single `keyword` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeywordList {
    One(String),
    Many(Vec<String>),
}

impl Default for KeywordList {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl KeywordList {
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(word) => vec![word],
            Self::Many(words) => words,
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(word) => std::slice::from_ref(word),
            Self::Many(words) => words,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEntry {
    #[serde(default, alias = "hanzi")]
    pub character: Option<String>,
    #[serde(default, alias = "heisig_index")]
    pub frame_number: Option<i64>,
    #[serde(default, alias = "keyword")]
    pub keywords: KeywordList,
    #[serde(default)]
    pub primitive_elements: Vec<String>,
    #[serde(default)]
    pub primitive_meanings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strokes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinyin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traditional: Option<String>,
}

impl ImportDocument {
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn from_json_slice(input: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(input)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
