// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use hanzi_explorer_model::{
    CatalogSnapshot, Character, Keyword, KeywordLink, Primitive, PrimitiveLink,
};

pub fn character(id: i64, hanzi: &str, index: i64) -> Character {
    Character {
        id,
        hanzi: hanzi.to_string(),
        heisig_index: index,
        story: None,
        strokes: None,
        pinyin: None,
        traditional: None,
        volume: Some(1),
        chapter: Some(1),
        created_at_ms: 1_000 + id,
        updated_at_ms: 1_000 + id,
    }
}

pub fn primitive(id: i64, name: &str, symbol: &str, meaning: Option<&str>) -> Primitive {
    Primitive {
        id,
        name: name.to_string(),
        symbol: symbol.to_string(),
        meaning: meaning.map(str::to_string),
        notes: None,
        created_at_ms: 0,
        updated_at_ms: 0,
    }
}

pub fn keyword(id: i64, word: &str) -> Keyword {
    Keyword {
        id,
        word: word.to_string(),
        notes: None,
        created_at_ms: 0,
    }
}

pub fn plink(character_id: i64, primitive_id: i64, position: i64) -> PrimitiveLink {
    PrimitiveLink {
        character_id,
        primitive_id,
        position,
    }
}

pub fn klink(character_id: i64, keyword_id: i64, position: i64) -> KeywordLink {
    KeywordLink {
        character_id,
        keyword_id,
        position,
    }
}

/// "一"(1, []), "二"(2, ["一"]), "三"(3, ["一", "二"]), all in book 1 chapter 1.
pub fn one_two_three() -> CatalogSnapshot {
    CatalogSnapshot {
        characters: vec![
            character(1, "一", 1),
            character(2, "二", 2),
            character(3, "三", 3),
        ],
        primitives: vec![
            primitive(10, "一", "一", Some("floor")),
            primitive(20, "二", "二", None),
        ],
        keywords: vec![keyword(100, "one"), keyword(200, "two"), keyword(300, "three")],
        primitive_links: vec![plink(2, 10, 0), plink(3, 10, 0), plink(3, 20, 1)],
        keyword_links: vec![klink(1, 100, 0), klink(2, 200, 0), klink(3, 300, 0)],
    }
}
