// SPDX-License-Identifier: Apache-2.0

use crate::IngestError;
use hanzi_explorer_model::{CatalogSnapshot, ImportDocument, ImportEntry, KeywordList};
use hanzi_explorer_query::{CatalogQuery, CharacterFilter};
use hanzi_explorer_store::EntityStore;
use std::fs;
use std::path::Path;

/// Catalog as a legacy document, ordered by index. Primitive meanings are
/// positional; a primitive without one exports as an empty string.
#[must_use]
pub fn export_snapshot(snapshot: &CatalogSnapshot) -> ImportDocument {
    let query = CatalogQuery::new(snapshot);
    let characters = query
        .list_characters(&CharacterFilter::default())
        .into_iter()
        .map(|view| ImportEntry {
            character: Some(view.hanzi),
            frame_number: Some(view.heisig_index),
            keywords: KeywordList::Many(view.keywords),
            primitive_elements: view.primitives.iter().map(|p| p.name.clone()).collect(),
            primitive_meanings: view
                .primitives
                .iter()
                .map(|p| p.meaning.clone().unwrap_or_default())
                .collect(),
            story: view.story,
            volume: view.volume,
            chapter: view.chapter,
            strokes: view.strokes,
            pinyin: view.pinyin,
            traditional: view.traditional,
        })
        .collect();
    ImportDocument { characters }
}

pub fn export_store(store: &EntityStore) -> Result<ImportDocument, IngestError> {
    let snapshot = store.snapshot()?;
    let doc = export_snapshot(&snapshot);
    tracing::info!(characters = doc.characters.len(), "catalog exported");
    Ok(doc)
}

pub fn export_path(store: &EntityStore, path: &Path) -> Result<usize, IngestError> {
    let doc = export_store(store)?;
    let text = doc
        .to_json_pretty()
        .map_err(|e| IngestError::Io(format!("encode export: {e}")))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| IngestError::Io(format!("{}: {e}", parent.display())))?;
    }
    fs::write(path, format!("{text}\n"))
        .map_err(|e| IngestError::Io(format!("{}: {e}", path.display())))?;
    Ok(doc.characters.len())
}
