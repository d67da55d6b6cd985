// SPDX-License-Identifier: Apache-2.0

use super::extract::QueryMap;
use super::response::{ok_json, parse_id, tagged_json, ApiFailure, HandlerResult};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Uri};
use hanzi_explorer_api::{
    openapi_spec, parse_character_filter, parse_search_params, ApiError, HealthResponse,
    StatsResponse, VersionResponse, API_VERSION,
};
use hanzi_explorer_model::CatalogSnapshot;
use hanzi_explorer_query::{CatalogQuery, RECENT_LIMIT};

pub(crate) async fn load_snapshot(state: &AppState) -> Result<CatalogSnapshot, ApiFailure> {
    Ok(state
        .with_store(|store| Ok(store.snapshot()?))
        .await?)
}

pub(crate) async fn healthz(State(state): State<AppState>) -> HandlerResult {
    state.with_store(|store| Ok(store.ping()?)).await?;
    Ok(ok_json(&HealthResponse {
        status: "ok".to_string(),
    }))
}

pub(crate) async fn version(State(state): State<AppState>) -> HandlerResult {
    let schema_version = state
        .with_store(|store| Ok(store.schema_version()?))
        .await?;
    Ok(ok_json(&VersionResponse {
        service: crate::CRATE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_version: API_VERSION.to_string(),
        schema_version,
    }))
}

pub(crate) async fn openapi(headers: HeaderMap) -> HandlerResult {
    tagged_json(&headers, &openapi_spec())
}

pub(crate) async fn list_characters(
    State(state): State<AppState>,
    headers: HeaderMap,
    QueryMap(params): QueryMap,
) -> HandlerResult {
    let filter = parse_character_filter(&params)?;
    let snapshot = load_snapshot(&state).await?;
    let characters = CatalogQuery::new(&snapshot).list_characters(&filter);
    tagged_json(&headers, &characters)
}

pub(crate) async fn metadata(State(state): State<AppState>, headers: HeaderMap) -> HandlerResult {
    let snapshot = load_snapshot(&state).await?;
    tagged_json(&headers, &CatalogQuery::new(&snapshot).list_metadata())
}

pub(crate) async fn character_by_glyph(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(glyph): Path<String>,
) -> HandlerResult {
    let snapshot = load_snapshot(&state).await?;
    let view = CatalogQuery::new(&snapshot).get_character_by_glyph(&glyph)?;
    tagged_json(&headers, &view)
}

pub(crate) async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    QueryMap(params): QueryMap,
) -> HandlerResult {
    let request = parse_search_params(&params)?;
    let snapshot = load_snapshot(&state).await?;
    let results = CatalogQuery::new(&snapshot).search(&request);
    tracing::debug!(q = %request.query, hits = results.len(), "search served");
    tagged_json(&headers, &results)
}

pub(crate) async fn graph_data(State(state): State<AppState>, headers: HeaderMap) -> HandlerResult {
    let snapshot = load_snapshot(&state).await?;
    tagged_json(&headers, &CatalogQuery::new(&snapshot).build_graph())
}

pub(crate) async fn list_primitives(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult {
    let snapshot = load_snapshot(&state).await?;
    tagged_json(&headers, &CatalogQuery::new(&snapshot).list_primitives())
}

pub(crate) async fn primitive_detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> HandlerResult {
    let id = parse_id("id", &raw_id)?;
    let snapshot = load_snapshot(&state).await?;
    let detail = CatalogQuery::new(&snapshot).get_primitive(id)?;
    tagged_json(&headers, &detail)
}

pub(crate) async fn stats(State(state): State<AppState>, headers: HeaderMap) -> HandlerResult {
    let (counts, snapshot) = state
        .with_store(|store| Ok((store.counts()?, store.snapshot()?)))
        .await?;
    let recent = CatalogQuery::new(&snapshot).recent_characters(RECENT_LIMIT);
    tagged_json(&headers, &StatsResponse { counts, recent })
}

pub(crate) async fn route_not_found(uri: Uri) -> ApiFailure {
    tracing::debug!(path = %uri.path(), "unmatched route");
    ApiFailure(ApiError::not_found("route not found"))
}
