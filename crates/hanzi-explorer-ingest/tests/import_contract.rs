// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use hanzi_explorer_ingest::{
    export_path, export_store, import_document, import_path, parse_document, IngestError,
    IngestStage, ImportMode,
};
use hanzi_explorer_query::{CatalogQuery, SearchRequest};
use hanzi_explorer_store::EntityStore;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(path)
}

fn sample() -> PathBuf {
    fixture("tests/fixtures/heisig_sample.json")
}

#[test]
fn import_creates_entities_and_relations() {
    let mut store = EntityStore::open_in_memory().expect("store");
    let report = import_path(&mut store, &sample(), ImportMode::Append).expect("import");
    assert_eq!(report.characters_created, 3);
    assert_eq!(report.primitives_created, 2);
    assert_eq!(report.keywords_created, 3);
    assert_eq!(report.primitives_reused, 0);
    let stages: Vec<IngestStage> = report.events.iter().map(|e| e.stage).collect();
    assert_eq!(stages.first(), Some(&IngestStage::Validate));
    assert_eq!(stages.last(), Some(&IngestStage::Finalize));

    let snapshot = store.snapshot().expect("snapshot");
    let q = CatalogQuery::new(&snapshot);
    let san = q.get_character_by_glyph("三").expect("三");
    let meanings: Vec<Option<&str>> = san
        .primitives
        .iter()
        .map(|p| p.meaning.as_deref())
        .collect();
    // First listing of 一 (in 二) decides its meaning.
    assert_eq!(meanings, vec![Some("floor"), Some("two")]);
    assert_eq!(san.pinyin.as_deref(), Some("sān"));
    let hits: Vec<String> = q
        .search(&SearchRequest::new("two"))
        .into_iter()
        .map(|v| v.hanzi)
        .collect();
    assert_eq!(hits, vec!["二".to_string(), "三".to_string()]);
}

#[test]
fn rerunning_an_append_import_fails_for_every_glyph_without_duplicating_entities() {
    let mut store = EntityStore::open_in_memory().expect("store");
    import_path(&mut store, &sample(), ImportMode::Append).expect("first import");
    let err = import_path(&mut store, &sample(), ImportMode::Append).expect_err("second import");
    match err {
        IngestError::DuplicateKey { glyphs } => {
            assert_eq!(glyphs, vec!["一", "二", "三"]);
        }
        other => panic!("unexpected error {other:?}"),
    }
    let counts = store.counts().expect("counts");
    assert_eq!(counts.characters, 3);
    assert_eq!(counts.primitives, 2);
    assert_eq!(counts.keywords, 3);
}

#[test]
fn partial_collision_inserts_no_characters() {
    let mut store = EntityStore::open_in_memory().expect("store");
    let doc = parse_document(r#"{"characters":[{"character":"二","frame_number":2}]}"#.as_bytes())
        .expect("doc");
    import_document(&mut store, doc, ImportMode::Append).expect("seed");
    let err = import_path(&mut store, &sample(), ImportMode::Append).expect_err("collision");
    assert!(matches!(err, IngestError::DuplicateKey { ref glyphs } if glyphs == &["二"]));
    assert_eq!(store.counts().expect("counts").characters, 1);
    // Pass 1 rows persist and are reused by the next run.
    let report = import_path(&mut store, &sample(), ImportMode::Replace).expect("replace");
    assert_eq!(report.characters_created, 3);
    assert_eq!(store.counts().expect("counts").characters, 3);
}

#[test]
fn malformed_document_writes_nothing() {
    let mut store = EntityStore::open_in_memory().expect("store");
    let doc = parse_document(
        r#"{"characters":[
            {"character":"一","frame_number":1,"primitive_elements":["x"]},
            {"character":"二"}
        ]}"#
        .as_bytes(),
    )
    .expect("doc");
    let err = import_document(&mut store, doc, ImportMode::Append).expect_err("malformed");
    assert!(matches!(err, IngestError::Malformed(_)));
    let counts = store.counts().expect("counts");
    assert_eq!((counts.characters, counts.primitives), (0, 0));
    assert!(matches!(
        parse_document(b"{\"characters\": 3}"),
        Err(IngestError::Malformed(_))
    ));
}

#[test]
fn export_then_import_reproduces_the_catalog() {
    let mut store = EntityStore::open_in_memory().expect("store");
    import_path(&mut store, &sample(), ImportMode::Append).expect("import");
    let dir = tempdir().expect("tmp");
    let out = dir.path().join("export").join("catalog.json");
    assert_eq!(export_path(&store, &out).expect("export"), 3);

    let mut copy = EntityStore::open_in_memory().expect("copy");
    import_path(&mut copy, &out, ImportMode::Append).expect("reimport");
    let original = export_store(&store).expect("original");
    let reproduced = export_store(&copy).expect("reproduced");
    assert_eq!(original, reproduced);
    assert_eq!(
        store.counts().expect("a").primitives,
        copy.counts().expect("b").primitives
    );
}
