// SPDX-License-Identifier: Apache-2.0

use crate::logging::{IngestEvent, IngestLog, IngestStage};
use crate::prepare::{parse_document, prepare_document};
use crate::IngestError;
use hanzi_explorer_model::{ImportDocument, KeywordDraft, PrimitiveDraft, SYMBOL_MAX_CHARS};
use hanzi_explorer_store::EntityStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Fail the character pass if any glyph or index is already present.
    #[default]
    Append,
    /// Clear characters, primitives and keywords before loading.
    Replace,
}

impl ImportMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Replace => "replace",
        }
    }
}

impl FromStr for ImportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "append" => Ok(Self::Append),
            "replace" => Ok(Self::Replace),
            other => Err(format!("unknown import mode `{other}` (expected append|replace)")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub mode: ImportMode,
    pub primitives_created: usize,
    pub primitives_reused: usize,
    pub keywords_created: usize,
    pub keywords_reused: usize,
    pub characters_created: usize,
    pub events: Vec<IngestEvent>,
}

fn symbol_for(element: &str) -> String {
    element.chars().take(SYMBOL_MAX_CHARS).collect()
}

pub fn import_path(
    store: &mut EntityStore,
    path: &Path,
    mode: ImportMode,
) -> Result<ImportReport, IngestError> {
    let bytes = fs::read(path).map_err(|e| IngestError::Io(format!("{}: {e}", path.display())))?;
    import_document(store, parse_document(&bytes)?, mode)
}

/// Two-pass load.
///
/// Pass 1 creates every referenced primitive and keyword (reusing rows with
/// the same natural key) and commits. Pass 2 inserts and wires characters in
/// its own transaction. A malformed document fails before pass 1, so no rows
/// are written; a pass 2 failure leaves pass 1 rows in place, and re-running
/// the same document reuses them.
pub fn import_document(
    store: &mut EntityStore,
    doc: ImportDocument,
    mode: ImportMode,
) -> Result<ImportReport, IngestError> {
    let mut log = IngestLog::default();
    let prepared = prepare_document(doc)?;
    log.emit(
        IngestStage::Validate,
        "document_validated",
        &[
            ("mode", mode.as_str().to_string()),
            ("characters", prepared.entries.len().to_string()),
            ("primitives", prepared.primitives.len().to_string()),
            ("keywords", prepared.keywords.len().to_string()),
        ],
    );

    let mut report = ImportReport {
        mode,
        ..ImportReport::default()
    };

    let (primitive_ids, keyword_ids) = store.write(|tx| {
        if mode == ImportMode::Replace {
            tx.clear_catalog()?;
        }
        let mut primitive_ids: HashMap<String, i64> = HashMap::new();
        for (element, meaning) in &prepared.primitives {
            let id = match tx.primitive_by_name(element)? {
                Some(existing) => {
                    report.primitives_reused += 1;
                    existing.id
                }
                None => {
                    let draft = PrimitiveDraft {
                        name: element.clone(),
                        symbol: symbol_for(element),
                        meaning: meaning.clone(),
                        notes: None,
                    };
                    report.primitives_created += 1;
                    tx.insert_primitive(&draft)?.id
                }
            };
            primitive_ids.insert(element.clone(), id);
        }
        let mut keyword_ids: HashMap<String, i64> = HashMap::new();
        for word in &prepared.keywords {
            let id = match tx.keyword_by_word(word)? {
                Some(existing) => {
                    report.keywords_reused += 1;
                    existing.id
                }
                None => {
                    report.keywords_created += 1;
                    tx.insert_keyword(&KeywordDraft::new(word.clone()))?.id
                }
            };
            keyword_ids.insert(word.clone(), id);
        }
        Ok::<_, IngestError>((primitive_ids, keyword_ids))
    })?;
    log.emit(
        IngestStage::Primitives,
        "primitives_ready",
        &[
            ("created", report.primitives_created.to_string()),
            ("reused", report.primitives_reused.to_string()),
        ],
    );
    log.emit(
        IngestStage::Keywords,
        "keywords_ready",
        &[
            ("created", report.keywords_created.to_string()),
            ("reused", report.keywords_reused.to_string()),
        ],
    );

    let pass2 = store.write(|tx| {
        let mut colliding = Vec::new();
        for entry in &prepared.entries {
            let draft = &entry.draft;
            if tx.character_by_hanzi(&draft.hanzi)?.is_some()
                || tx.character_by_index(draft.heisig_index)?.is_some()
            {
                colliding.push(draft.hanzi.clone());
            }
        }
        if !colliding.is_empty() {
            return Err(IngestError::DuplicateKey { glyphs: colliding });
        }
        let mut created = 0_usize;
        for entry in &prepared.entries {
            let draft = &entry.draft;
            let character = tx.insert_character(draft)?;
            let pids: Vec<i64> = draft
                .primitives
                .iter()
                .filter_map(|name| primitive_ids.get(name).copied())
                .collect();
            let kids: Vec<i64> = draft
                .keywords
                .iter()
                .filter_map(|word| keyword_ids.get(word).copied())
                .collect();
            tx.replace_character_primitives(character.id, &pids)?;
            tx.replace_character_keywords(character.id, &kids)?;
            created += 1;
        }
        Ok(created)
    });
    match pass2 {
        Ok(created) => report.characters_created = created,
        Err(err) => {
            if let IngestError::DuplicateKey { glyphs } = &err {
                log.emit(
                    IngestStage::Characters,
                    "characters_rejected",
                    &[("colliding", glyphs.len().to_string())],
                );
            }
            tracing::warn!(error = %err, "import character pass failed; primitives and keywords kept");
            return Err(err);
        }
    }
    log.emit(
        IngestStage::Characters,
        "characters_created",
        &[("created", report.characters_created.to_string())],
    );
    log.emit(IngestStage::Finalize, "import_completed", &[]);
    report.events = log.into_events();
    Ok(report)
}
