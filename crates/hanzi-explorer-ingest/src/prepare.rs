// SPDX-License-Identifier: Apache-2.0

use crate::IngestError;
use hanzi_explorer_model::{CharacterDraft, ImportDocument, ImportEntry};
use std::collections::{BTreeMap, HashMap};

/// One document entry turned into a validated draft, plus the meanings its
/// primitive list carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PreparedEntry {
    pub draft: CharacterDraft,
    pub meanings: Vec<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PreparedDocument {
    pub entries: Vec<PreparedEntry>,
    /// Distinct primitive elements, first-seen order, with the meaning from
    /// the first entry that lists them.
    pub primitives: Vec<(String, Option<String>)>,
    /// Distinct keyword words, first-seen order.
    pub keywords: Vec<String>,
}

pub fn parse_document(bytes: &[u8]) -> Result<ImportDocument, IngestError> {
    ImportDocument::from_json_slice(bytes).map_err(|e| IngestError::Malformed(e.to_string()))
}

fn prepare_entry(position: usize, entry: ImportEntry) -> Result<PreparedEntry, IngestError> {
    let glyph = entry
        .character
        .ok_or_else(|| IngestError::Malformed(format!("entry {position}: missing character")))?;
    let index = entry.frame_number.ok_or_else(|| {
        IngestError::Malformed(format!("entry {position}: missing frame_number"))
    })?;
    let meanings: Vec<Option<String>> = entry
        .primitive_elements
        .iter()
        .enumerate()
        .map(|(i, _)| {
            entry
                .primitive_meanings
                .get(i)
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
        })
        .collect();
    let draft = CharacterDraft {
        hanzi: glyph,
        heisig_index: index,
        story: entry.story,
        strokes: entry.strokes,
        pinyin: entry.pinyin,
        traditional: entry.traditional,
        volume: entry.volume,
        chapter: entry.chapter,
        primitives: entry.primitive_elements,
        keywords: entry.keywords.into_vec(),
    };
    // Pair meanings with elements before normalization drops blanks and repeats.
    let paired: Vec<(String, Option<String>)> = draft
        .primitives
        .iter()
        .map(|p| p.trim().to_string())
        .zip(meanings)
        .collect();
    let draft = draft.normalized();
    draft.validate().map_err(|e| {
        IngestError::Malformed(format!("entry {position} ({}): {e}", draft.hanzi))
    })?;
    let meanings = draft
        .primitives
        .iter()
        .map(|name| {
            paired
                .iter()
                .find(|(element, _)| element == name)
                .and_then(|(_, meaning)| meaning.clone())
        })
        .collect();
    Ok(PreparedEntry { draft, meanings })
}

/// Checks the whole document before anything touches the store.
pub(crate) fn prepare_document(doc: ImportDocument) -> Result<PreparedDocument, IngestError> {
    let mut out = PreparedDocument::default();
    let mut glyphs: HashMap<String, usize> = HashMap::new();
    let mut indexes: HashMap<i64, usize> = HashMap::new();
    let mut primitive_meanings: BTreeMap<String, Option<String>> = BTreeMap::new();

    for (position, entry) in doc.characters.into_iter().enumerate() {
        let prepared = prepare_entry(position, entry)?;
        let draft = &prepared.draft;
        if let Some(first) = glyphs.insert(draft.hanzi.clone(), position) {
            return Err(IngestError::Malformed(format!(
                "entry {position}: character {} repeats entry {first}",
                draft.hanzi
            )));
        }
        if let Some(first) = indexes.insert(draft.heisig_index, position) {
            return Err(IngestError::Malformed(format!(
                "entry {position}: frame_number {} repeats entry {first}",
                draft.heisig_index
            )));
        }
        for (name, meaning) in draft.primitives.iter().zip(&prepared.meanings) {
            if !primitive_meanings.contains_key(name) {
                primitive_meanings.insert(name.clone(), meaning.clone());
                out.primitives.push((name.clone(), meaning.clone()));
            }
        }
        for word in &draft.keywords {
            if !out.keywords.contains(word) {
                out.keywords.push(word.clone());
            }
        }
        out.entries.push(prepared);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> ImportDocument {
        parse_document(json.as_bytes()).expect("parse")
    }

    #[test]
    fn first_listing_decides_primitive_meaning() {
        let prepared = prepare_document(doc(
            r#"{"characters":[
                {"character":"二","frame_number":2,"primitive_elements":["一"]},
                {"character":"三","frame_number":3,"primitive_elements":["一","二"],
                 "primitive_meanings":["floor","two"]}
            ]}"#,
        ))
        .expect("prepare");
        assert_eq!(
            prepared.primitives,
            vec![
                ("一".to_string(), None),
                ("二".to_string(), Some("two".to_string()))
            ]
        );
    }

    #[test]
    fn in_document_duplicates_are_malformed() {
        let err = prepare_document(doc(
            r#"{"characters":[
                {"character":"一","frame_number":1},
                {"character":"一","frame_number":2}
            ]}"#,
        ))
        .expect_err("duplicate glyph");
        assert!(matches!(err, IngestError::Malformed(msg) if msg.contains("repeats")));
    }

    #[test]
    fn missing_index_is_malformed() {
        let err = prepare_document(doc(r#"{"characters":[{"character":"一"}]}"#))
            .expect_err("missing index");
        assert!(matches!(err, IngestError::Malformed(msg) if msg.contains("frame_number")));
    }
}
