// SPDX-License-Identifier: Apache-2.0

use hanzi_explorer_model::{CharacterDraft, KeywordDraft, NewUser, PrimitiveDraft};
use hanzi_explorer_store::{EntityStore, MutationError, Mutations};

const TEST_ROUNDS: u32 = 64;

fn store_with_primitives() -> EntityStore {
    let mut store = EntityStore::open_in_memory().expect("open");
    let mut m = Mutations::new(&mut store);
    m.create_primitive(PrimitiveDraft::new("one", "一").with_meaning("floor"))
        .expect("one");
    m.create_primitive(PrimitiveDraft::new("two", "二"))
        .expect("two");
    store
}

fn field_names(err: &MutationError) -> Vec<String> {
    match err {
        MutationError::DuplicateKey { fields } | MutationError::Validation { fields } => {
            fields.iter().map(|f| f.field.clone()).collect()
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn create_character_wires_relations_and_autocreates_keywords() {
    let mut store = store_with_primitives();
    let character = Mutations::new(&mut store)
        .create_character(
            CharacterDraft::new("三", 3)
                .with_primitives(&["one", "two"])
                .with_keywords(&["three", "trio"]),
        )
        .expect("create");
    let primitive_names: Vec<String> = store
        .primitive_ids_for(character.id)
        .expect("ids")
        .into_iter()
        .map(|id| store.get_primitive(id).expect("get").expect("exists").name)
        .collect();
    assert_eq!(primitive_names, vec!["one".to_string(), "two".to_string()]);
    assert_eq!(store.keyword_ids_for(character.id).expect("kw").len(), 2);
    assert!(store.keyword_by_word("trio").expect("kw").is_some());
}

#[test]
fn unknown_primitive_is_a_validation_error_and_nothing_is_written() {
    let mut store = store_with_primitives();
    let err = Mutations::new(&mut store)
        .create_character(
            CharacterDraft::new("三", 3)
                .with_primitives(&["one", "ghost"])
                .with_keywords(&["three"]),
        )
        .expect_err("unknown primitive");
    assert_eq!(field_names(&err), vec!["primitives".to_string()]);
    let counts = store.counts().expect("counts");
    assert_eq!(counts.characters, 0);
    assert_eq!(counts.keywords, 0);
}

#[test]
fn duplicate_glyph_and_index_are_both_reported() {
    let mut store = store_with_primitives();
    let mut m = Mutations::new(&mut store);
    m.create_character(CharacterDraft::new("一", 1)).expect("first");
    let err = m
        .create_character(CharacterDraft::new("一", 1))
        .expect_err("duplicate");
    assert_eq!(
        field_names(&err),
        vec!["hanzi".to_string(), "heisig_index".to_string()]
    );
}

#[test]
fn update_replaces_relations_atomically_and_excludes_self_from_uniqueness() {
    let mut store = store_with_primitives();
    let c = Mutations::new(&mut store)
        .create_character(CharacterDraft::new("三", 3).with_primitives(&["one", "two"]))
        .expect("create");
    let before = store.primitive_ids_for(c.id).expect("ids before");
    assert_eq!(before.len(), 2);

    let err = Mutations::new(&mut store)
        .update_character(
            c.id,
            CharacterDraft::new("三", 3).with_primitives(&["ghost", "two"]),
        )
        .expect_err("unknown primitive");
    assert_eq!(field_names(&err), vec!["primitives".to_string()]);
    assert_eq!(store.primitive_ids_for(c.id).expect("ids after failure"), before);

    let updated = Mutations::new(&mut store)
        .update_character(
            c.id,
            CharacterDraft::new("三", 3)
                .with_primitives(&["two"])
                .with_story("three lines"),
        )
        .expect("update");
    assert_eq!(updated.story.as_deref(), Some("three lines"));
    assert!(updated.updated_at_ms >= updated.created_at_ms);
    let after = store.primitive_ids_for(c.id).expect("ids after update");
    assert_eq!(after, vec![before[1]]);
}

#[test]
fn invalid_draft_reports_every_field() {
    let mut store = EntityStore::open_in_memory().expect("open");
    let err = Mutations::new(&mut store)
        .create_character(CharacterDraft {
            strokes: Some(0),
            ..CharacterDraft::new("", 0)
        })
        .expect_err("invalid");
    assert_eq!(
        field_names(&err),
        vec![
            "hanzi".to_string(),
            "heisig_index".to_string(),
            "strokes".to_string()
        ]
    );
}

#[test]
fn deletes_report_not_found() {
    let mut store = EntityStore::open_in_memory().expect("open");
    let mut m = Mutations::new(&mut store);
    assert!(matches!(
        m.delete_character(5),
        Err(MutationError::NotFound { entity: "character", .. })
    ));
    assert!(matches!(
        m.delete_keyword(5),
        Err(MutationError::NotFound { entity: "keyword", .. })
    ));
    let kw = m.create_keyword(KeywordDraft::new("sun")).expect("kw");
    m.delete_keyword(kw.id).expect("delete");
}

#[test]
fn users_register_authenticate_and_toggle_admin() {
    let mut store = EntityStore::open_in_memory().expect("open");
    let mut m = Mutations::new(&mut store).with_password_rounds(TEST_ROUNDS);
    let user = m
        .create_user(NewUser {
            username: "curator".into(),
            email: "Curator@Example.org".into(),
            password: "correct horse".into(),
            is_admin: false,
        })
        .expect("create user");
    assert_eq!(user.email, "curator@example.org");
    assert_ne!(user.password_hash, "correct horse");

    let err = m
        .create_user(NewUser {
            username: "curator".into(),
            email: "curator@example.org".into(),
            password: "another one".into(),
            is_admin: false,
        })
        .expect_err("duplicate");
    assert_eq!(
        field_names(&err),
        vec!["username".to_string(), "email".to_string()]
    );

    assert!(m
        .authenticate("curator", "correct horse")
        .expect("auth")
        .is_some());
    assert!(m.authenticate("curator", "wrong").expect("auth").is_none());
    assert!(m.authenticate("nobody", "x").expect("auth").is_none());

    let promoted = m.set_admin("curator", true).expect("promote");
    assert!(promoted.is_admin);
    assert!(matches!(
        m.set_admin("nobody", true),
        Err(MutationError::NotFound { entity: "user", .. })
    ));
}
