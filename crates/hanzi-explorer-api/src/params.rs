// SPDX-License-Identifier: Apache-2.0

use crate::errors::ApiError;
use hanzi_explorer_ingest::ImportMode;
use hanzi_explorer_query::{CharacterFilter, SearchRequest};
use std::collections::BTreeMap;

pub const MAX_SEARCH_QUERY_CHARS: usize = 200;

/// Blank or non-integer values count as absent, so `?volume=` and
/// `?volume=abc` both mean "no filter".
fn parse_optional_int(query: &BTreeMap<String, String>, name: &str) -> Option<i64> {
    let raw = query.get(name)?.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = raw.parse::<i64>().ok();
    if parsed.is_none() {
        tracing::debug!(parameter = name, value = raw, "ignoring non-integer filter");
    }
    parsed
}

pub fn parse_character_filter(
    query: &BTreeMap<String, String>,
) -> Result<CharacterFilter, ApiError> {
    Ok(CharacterFilter::new(
        parse_optional_int(query, "volume"),
        parse_optional_int(query, "chapter"),
    ))
}

pub fn parse_search_params(query: &BTreeMap<String, String>) -> Result<SearchRequest, ApiError> {
    let filter = parse_character_filter(query)?;
    let q = query.get("q").map(String::as_str).unwrap_or_default();
    if q.chars().count() > MAX_SEARCH_QUERY_CHARS {
        return Err(ApiError::invalid_param("q", "<too long>"));
    }
    Ok(SearchRequest::new(q).with_filter(filter))
}

pub fn parse_import_mode(query: &BTreeMap<String, String>) -> Result<ImportMode, ApiError> {
    match query.get("mode") {
        None => Ok(ImportMode::Append),
        Some(raw) => raw
            .parse::<ImportMode>()
            .map_err(|_| ApiError::invalid_param("mode", raw)),
    }
}
