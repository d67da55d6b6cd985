// SPDX-License-Identifier: Apache-2.0

use crate::filters::{CharacterFilter, SearchRequest};
use crate::normalize::{normalize_glyph, normalize_text};
use crate::QueryError;
use hanzi_explorer_model::{
    CatalogSnapshot, Character, CharacterId, CharacterRef, CharacterView, ChapterEntry, Keyword,
    KeywordId, Metadata, Primitive, PrimitiveDetail, PrimitiveId, PrimitiveRef, VolumeEntry,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Read-side view over one snapshot. Relationship lookups are indexed once
/// at construction; every query is a single pass over `characters`.
pub struct CatalogQuery<'s> {
    snapshot: &'s CatalogSnapshot,
    primitives: HashMap<PrimitiveId, &'s Primitive>,
    keywords: HashMap<KeywordId, &'s Keyword>,
    primitive_ids: HashMap<CharacterId, Vec<PrimitiveId>>,
    keyword_ids: HashMap<CharacterId, Vec<KeywordId>>,
}

impl<'s> CatalogQuery<'s> {
    #[must_use]
    pub fn new(snapshot: &'s CatalogSnapshot) -> Self {
        let primitives = snapshot.primitives.iter().map(|p| (p.id, p)).collect();
        let keywords = snapshot.keywords.iter().map(|k| (k.id, k)).collect();

        let mut primitive_links: Vec<_> = snapshot.primitive_links.iter().collect();
        primitive_links.sort_by_key(|l| (l.character_id, l.position));
        let mut primitive_ids: HashMap<CharacterId, Vec<PrimitiveId>> = HashMap::new();
        for link in primitive_links {
            primitive_ids
                .entry(link.character_id)
                .or_default()
                .push(link.primitive_id);
        }

        let mut keyword_links: Vec<_> = snapshot.keyword_links.iter().collect();
        keyword_links.sort_by_key(|l| (l.character_id, l.position));
        let mut keyword_ids: HashMap<CharacterId, Vec<KeywordId>> = HashMap::new();
        for link in keyword_links {
            keyword_ids
                .entry(link.character_id)
                .or_default()
                .push(link.keyword_id);
        }

        Self {
            snapshot,
            primitives,
            keywords,
            primitive_ids,
            keyword_ids,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &'s CatalogSnapshot {
        self.snapshot
    }

    fn keyword_words(&self, id: CharacterId) -> Vec<&'s str> {
        self.keyword_ids
            .get(&id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|k| self.keywords.get(k).copied().map(|kw| kw.word.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn character_primitives(&self, id: CharacterId) -> Vec<&'s Primitive> {
        self.primitive_ids
            .get(&id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|p| self.primitives.get(p).copied())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First linked keyword, if any.
    #[must_use]
    pub fn primary_keyword(&self, id: CharacterId) -> Option<&'s str> {
        self.keyword_words(id).first().copied()
    }

    #[must_use]
    pub fn view(&self, character: &Character) -> CharacterView {
        let keywords: Vec<String> = self
            .keyword_words(character.id)
            .into_iter()
            .map(str::to_string)
            .collect();
        let primitives = self
            .character_primitives(character.id)
            .into_iter()
            .map(|p| PrimitiveRef {
                id: p.id,
                name: p.name.clone(),
                symbol: p.symbol.clone(),
                meaning: p.meaning.clone(),
            })
            .collect();
        CharacterView {
            id: character.id,
            hanzi: character.hanzi.clone(),
            heisig_index: character.heisig_index,
            keyword: keywords.first().cloned(),
            keywords,
            story: character.story.clone(),
            strokes: character.strokes,
            pinyin: character.pinyin.clone(),
            traditional: character.traditional.clone(),
            volume: character.volume,
            chapter: character.chapter,
            primitives,
            created_at_ms: character.created_at_ms,
            updated_at_ms: character.updated_at_ms,
        }
    }

    fn filtered(&self, filter: &CharacterFilter) -> impl Iterator<Item = &'s Character> + '_ {
        let filter = *filter;
        self.snapshot
            .characters
            .iter()
            .filter(move |c| filter.matches(c.volume, c.chapter))
    }

    /// Characters in `heisig_index` order, narrowed by volume/chapter.
    #[must_use]
    pub fn list_characters(&self, filter: &CharacterFilter) -> Vec<CharacterView> {
        self.filtered(filter).map(|c| self.view(c)).collect()
    }

    /// Distinct volumes and their chapters; null groupings are left out.
    #[must_use]
    pub fn list_metadata(&self) -> Metadata {
        let mut grouped: BTreeMap<i64, BTreeSet<i64>> = BTreeMap::new();
        for c in &self.snapshot.characters {
            let Some(volume) = c.volume else { continue };
            let chapters = grouped.entry(volume).or_default();
            if let Some(chapter) = c.chapter {
                chapters.insert(chapter);
            }
        }
        Metadata {
            volumes: grouped
                .into_iter()
                .map(|(number, chapters)| VolumeEntry {
                    number,
                    title: format!("Book {number}"),
                    chapters: chapters
                        .into_iter()
                        .map(|n| ChapterEntry {
                            number: n,
                            title: format!("Chapter {n}"),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    pub fn get_character_by_glyph(&self, glyph: &str) -> Result<CharacterView, QueryError> {
        let glyph = normalize_glyph(glyph);
        self.snapshot
            .characters
            .iter()
            .find(|c| normalize_glyph(&c.hanzi) == glyph)
            .map(|c| self.view(c))
            .ok_or_else(|| QueryError::not_found("Character not found"))
    }

    pub fn get_character(&self, id: CharacterId) -> Result<CharacterView, QueryError> {
        self.snapshot
            .characters
            .iter()
            .find(|c| c.id == id)
            .map(|c| self.view(c))
            .ok_or_else(|| QueryError::not_found("Character not found"))
    }

    fn matches_text(&self, character: &Character, needle: &str) -> bool {
        if normalize_text(&character.hanzi).contains(needle) {
            return true;
        }
        if character
            .story
            .as_deref()
            .is_some_and(|s| normalize_text(s).contains(needle))
        {
            return true;
        }
        if self
            .keyword_words(character.id)
            .iter()
            .any(|w| normalize_text(w).contains(needle))
        {
            return true;
        }
        self.character_primitives(character.id).iter().any(|p| {
            normalize_text(&p.name).contains(needle)
                || normalize_text(&p.symbol).contains(needle)
                || p.meaning
                    .as_deref()
                    .is_some_and(|m| normalize_text(m).contains(needle))
        })
    }

    /// Volume/chapter narrow first, then the text predicate is ORed across
    /// glyph, story, keywords and primitives. Each character appears at most
    /// once, in list order. A blank query matches everything.
    #[must_use]
    pub fn search(&self, request: &SearchRequest) -> Vec<CharacterView> {
        let needle = normalize_text(&request.query);
        self.filtered(&request.filter)
            .filter(|c| needle.is_empty() || self.matches_text(c, &needle))
            .map(|c| self.view(c))
            .collect()
    }

    #[must_use]
    pub fn list_primitives(&self) -> Vec<Primitive> {
        self.snapshot.primitives.clone()
    }

    pub fn get_primitive(&self, id: PrimitiveId) -> Result<PrimitiveDetail, QueryError> {
        let primitive = self
            .primitives
            .get(&id)
            .ok_or_else(|| QueryError::not_found("Primitive not found"))?;
        let characters = self
            .snapshot
            .characters
            .iter()
            .filter(|c| {
                self.primitive_ids
                    .get(&c.id)
                    .is_some_and(|ids| ids.contains(&id))
            })
            .map(|c| CharacterRef {
                id: c.id,
                hanzi: c.hanzi.clone(),
                heisig_index: c.heisig_index,
                keyword: self.primary_keyword(c.id).map(str::to_string),
            })
            .collect();
        Ok(PrimitiveDetail {
            primitive: (*primitive).clone(),
            characters,
        })
    }

    /// Newest first by creation time, ties broken by id descending.
    #[must_use]
    pub fn recent_characters(&self, limit: usize) -> Vec<CharacterView> {
        let mut all: Vec<&Character> = self.snapshot.characters.iter().collect();
        all.sort_by(|a, b| {
            b.created_at_ms
                .cmp(&a.created_at_ms)
                .then_with(|| b.id.cmp(&a.id))
        });
        all.into_iter().take(limit).map(|c| self.view(c)).collect()
    }
}
