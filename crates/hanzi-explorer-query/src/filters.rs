// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Exact-match grouping filter. Both parts are ANDed; `None` matches all.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CharacterFilter {
    pub volume: Option<i64>,
    pub chapter: Option<i64>,
}

impl CharacterFilter {
    #[must_use]
    pub fn new(volume: Option<i64>, chapter: Option<i64>) -> Self {
        Self { volume, chapter }
    }

    #[must_use]
    pub fn matches(&self, volume: Option<i64>, chapter: Option<i64>) -> bool {
        self.volume.map_or(true, |v| volume == Some(v))
            && self.chapter.map_or(true, |c| chapter == Some(c))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    #[serde(flatten)]
    pub filter: CharacterFilter,
}

impl SearchRequest {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            filter: CharacterFilter::default(),
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: CharacterFilter) -> Self {
        self.filter = filter;
        self
    }
}
