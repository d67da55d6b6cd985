// SPDX-License-Identifier: Apache-2.0

mod support;

use hanzi_explorer_query::{CatalogQuery, CharacterFilter, QueryErrorCode, SearchRequest};
use support::{character, one_two_three};

fn glyphs(views: &[hanzi_explorer_model::CharacterView]) -> Vec<&str> {
    views.iter().map(|v| v.hanzi.as_str()).collect()
}

#[test]
fn search_by_keyword_returns_single_match() {
    let snapshot = one_two_three();
    let q = CatalogQuery::new(&snapshot);
    assert_eq!(glyphs(&q.search(&SearchRequest::new("two"))), vec!["二"]);
}

#[test]
fn full_width_query_matches_ascii_keyword() {
    let snapshot = one_two_three();
    let q = CatalogQuery::new(&snapshot);
    assert_eq!(glyphs(&q.search(&SearchRequest::new("ＴＷＯ"))), vec!["二"]);
}

#[test]
fn search_by_primitive_meaning_and_glyph_deduplicates() {
    let snapshot = one_two_three();
    let q = CatalogQuery::new(&snapshot);
    // "floor" is the meaning of primitive 一, used by 二 and 三.
    assert_eq!(glyphs(&q.search(&SearchRequest::new("FLOOR"))), vec!["二", "三"]);
    // 三 matches through its primitive 二.
    assert_eq!(glyphs(&q.search(&SearchRequest::new("二"))), vec!["二", "三"]);
}

#[test]
fn blank_query_returns_filtered_set() {
    let mut snapshot = one_two_three();
    snapshot.characters[2].chapter = Some(2);
    let q = CatalogQuery::new(&snapshot);
    let req = SearchRequest::new("   ").with_filter(CharacterFilter::new(Some(1), Some(1)));
    assert_eq!(glyphs(&q.search(&req)), vec!["一", "二"]);
    let req = SearchRequest::new("").with_filter(CharacterFilter::new(Some(2), None));
    assert!(q.search(&req).is_empty());
}

#[test]
fn metadata_groups_distinct_volumes_and_chapters() {
    let snapshot = one_two_three();
    let metadata = CatalogQuery::new(&snapshot).list_metadata();
    let value = serde_json::to_value(&metadata).expect("json");
    assert_eq!(
        value,
        serde_json::json!({"volumes":[{"number":1,"title":"Book 1",
            "chapters":[{"number":1,"title":"Chapter 1"}]}]})
    );
}

#[test]
fn metadata_excludes_null_groupings() {
    let mut snapshot = one_two_three();
    snapshot.characters[0].volume = None;
    snapshot.characters[1].chapter = None;
    snapshot.characters[1].volume = Some(2);
    let mut orphan = character(4, "四", 4);
    orphan.volume = None;
    orphan.chapter = Some(9);
    snapshot.characters.push(orphan);
    let metadata = CatalogQuery::new(&snapshot).list_metadata();
    let volumes: Vec<(i64, usize)> = metadata
        .volumes
        .iter()
        .map(|v| (v.number, v.chapters.len()))
        .collect();
    assert_eq!(volumes, vec![(1, 1), (2, 0)]);
}

#[test]
fn glyph_lookup_joins_keywords_and_primitives_in_order() {
    let snapshot = one_two_three();
    let q = CatalogQuery::new(&snapshot);
    let view = q.get_character_by_glyph(" 三 ").expect("found");
    assert_eq!(view.keyword.as_deref(), Some("three"));
    let names: Vec<&str> = view.primitives.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["一", "二"]);
    let err = q.get_character_by_glyph("龍").expect_err("missing");
    assert_eq!(err.code, QueryErrorCode::NotFound);
    assert_eq!(err.message, "Character not found");
}

#[test]
fn primitive_detail_lists_characters_that_use_it() {
    let snapshot = one_two_three();
    let q = CatalogQuery::new(&snapshot);
    let detail = q.get_primitive(10).expect("primitive");
    let users: Vec<(&str, Option<&str>)> = detail
        .characters
        .iter()
        .map(|c| (c.hanzi.as_str(), c.keyword.as_deref()))
        .collect();
    assert_eq!(users, vec![("二", Some("two")), ("三", Some("three"))]);
    let value = serde_json::to_value(&detail).expect("json");
    assert_eq!(value["name"], "一");
    assert!(q.get_primitive(99).is_err());
}

#[test]
fn recent_characters_are_newest_first() {
    let snapshot = one_two_three();
    let q = CatalogQuery::new(&snapshot);
    assert_eq!(glyphs(&q.recent_characters(2)), vec!["三", "二"]);
}
