// SPDX-License-Identifier: Apache-2.0

use crate::entity::{Character, Keyword, KeywordLink, Primitive, PrimitiveLink};
use serde::{Deserialize, Serialize};

/// Point-in-time copy of the whole catalog, read in one transaction.
///
/// `characters` are ordered by `heisig_index`, `primitives` by `name`,
/// `keywords` by `word`; link vectors are ordered by
/// `(character_id, position)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub characters: Vec<Character>,
    pub primitives: Vec<Primitive>,
    pub keywords: Vec<Keyword>,
    pub primitive_links: Vec<PrimitiveLink>,
    pub keyword_links: Vec<KeywordLink>,
}

impl CatalogSnapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.primitives.is_empty() && self.keywords.is_empty()
    }
}
