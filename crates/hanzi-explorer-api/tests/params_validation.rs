// SPDX-License-Identifier: Apache-2.0

use hanzi_explorer_api::{
    parse_character_filter, parse_import_mode, parse_search_params, ApiErrorCode,
    MAX_SEARCH_QUERY_CHARS,
};
use hanzi_explorer_ingest::ImportMode;
use std::collections::BTreeMap;

fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn non_integer_filters_fall_back_to_no_filter() {
    let filter = parse_character_filter(&query(&[("volume", "one")])).expect("volume");
    assert_eq!(filter.volume, None);
    let req = parse_search_params(&query(&[("q", "x"), ("volume", "2"), ("chapter", "1.5")]))
        .expect("chapter");
    assert_eq!(req.filter.volume, Some(2));
    assert_eq!(req.filter.chapter, None);
}

#[test]
fn search_params_carry_filter_and_query() {
    let req = parse_search_params(&query(&[("q", "two"), ("volume", "1")])).expect("params");
    assert_eq!(req.query, "two");
    assert_eq!(req.filter.volume, Some(1));
    assert_eq!(req.filter.chapter, None);
    let empty = parse_search_params(&BTreeMap::new()).expect("empty");
    assert!(empty.query.is_empty());
}

#[test]
fn overlong_search_query_is_rejected() {
    let long = "x".repeat(MAX_SEARCH_QUERY_CHARS + 1);
    let err = parse_search_params(&query(&[("q", &long)])).expect_err("too long");
    assert_eq!(err.code, ApiErrorCode::InvalidQueryParameter);
}

#[test]
fn import_mode_defaults_to_append() {
    assert_eq!(
        parse_import_mode(&BTreeMap::new()).expect("default"),
        ImportMode::Append
    );
    assert_eq!(
        parse_import_mode(&query(&[("mode", "replace")])).expect("replace"),
        ImportMode::Replace
    );
    assert!(parse_import_mode(&query(&[("mode", "merge")])).is_err());
}
