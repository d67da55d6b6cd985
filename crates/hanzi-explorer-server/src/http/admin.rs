// SPDX-License-Identifier: Apache-2.0

use super::extract::{AdminUser, JsonBody, QueryMap, RawBody};
use super::public::load_snapshot;
use super::response::{created, ok_json, parse_id, HandlerResult};
use crate::AppState;
use axum::extract::{Path, State};
use hanzi_explorer_api::{parse_character_filter, parse_import_mode, DeletedResponse, StatsResponse};
use hanzi_explorer_ingest::{export_store, import_document, parse_document};
use hanzi_explorer_model::{CharacterDraft, KeywordDraft, PrimitiveDraft};
use hanzi_explorer_query::{CatalogQuery, RECENT_LIMIT};
use hanzi_explorer_store::Mutations;

fn deleted(id: i64) -> DeletedResponse {
    DeletedResponse { deleted: true, id }
}

pub(crate) async fn dashboard(State(state): State<AppState>, _admin: AdminUser) -> HandlerResult {
    let (counts, snapshot) = state
        .with_store(|store| Ok((store.counts()?, store.snapshot()?)))
        .await?;
    let recent = CatalogQuery::new(&snapshot).recent_characters(RECENT_LIMIT);
    Ok(ok_json(&StatsResponse { counts, recent }))
}

pub(crate) async fn list_characters(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryMap(params): QueryMap,
) -> HandlerResult {
    let filter = parse_character_filter(&params)?;
    let snapshot = load_snapshot(&state).await?;
    Ok(ok_json(&CatalogQuery::new(&snapshot).list_characters(&filter)))
}

pub(crate) async fn get_character(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(raw_id): Path<String>,
) -> HandlerResult {
    let id = parse_id("id", &raw_id)?;
    let snapshot = load_snapshot(&state).await?;
    Ok(ok_json(&CatalogQuery::new(&snapshot).get_character(id)?))
}

pub(crate) async fn create_character(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    JsonBody(draft): JsonBody<CharacterDraft>,
) -> HandlerResult {
    let view = state
        .with_store(move |store| {
            let character = Mutations::new(store).create_character(draft)?;
            let snapshot = store.snapshot()?;
            Ok(CatalogQuery::new(&snapshot).get_character(character.id)?)
        })
        .await?;
    tracing::info!(admin_id = admin.id, character_id = view.id, "admin created character");
    Ok(created(&view))
}

pub(crate) async fn update_character(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(raw_id): Path<String>,
    JsonBody(draft): JsonBody<CharacterDraft>,
) -> HandlerResult {
    let id = parse_id("id", &raw_id)?;
    let view = state
        .with_store(move |store| {
            Mutations::new(store).update_character(id, draft)?;
            let snapshot = store.snapshot()?;
            Ok(CatalogQuery::new(&snapshot).get_character(id)?)
        })
        .await?;
    tracing::info!(admin_id = admin.id, character_id = id, "admin updated character");
    Ok(ok_json(&view))
}

pub(crate) async fn delete_character(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(raw_id): Path<String>,
) -> HandlerResult {
    let id = parse_id("id", &raw_id)?;
    state
        .with_store(move |store| Ok(Mutations::new(store).delete_character(id)?))
        .await?;
    tracing::info!(admin_id = admin.id, character_id = id, "admin deleted character");
    Ok(ok_json(&deleted(id)))
}

pub(crate) async fn list_primitives(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> HandlerResult {
    let primitives = state
        .with_store(|store| Ok(store.list_primitives()?))
        .await?;
    Ok(ok_json(&primitives))
}

pub(crate) async fn get_primitive(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(raw_id): Path<String>,
) -> HandlerResult {
    let id = parse_id("id", &raw_id)?;
    let snapshot = load_snapshot(&state).await?;
    Ok(ok_json(&CatalogQuery::new(&snapshot).get_primitive(id)?))
}

pub(crate) async fn create_primitive(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    JsonBody(draft): JsonBody<PrimitiveDraft>,
) -> HandlerResult {
    let primitive = state
        .with_store(move |store| Ok(Mutations::new(store).create_primitive(draft)?))
        .await?;
    tracing::info!(admin_id = admin.id, primitive_id = primitive.id, "admin created primitive");
    Ok(created(&primitive))
}

pub(crate) async fn update_primitive(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(raw_id): Path<String>,
    JsonBody(draft): JsonBody<PrimitiveDraft>,
) -> HandlerResult {
    let id = parse_id("id", &raw_id)?;
    let primitive = state
        .with_store(move |store| Ok(Mutations::new(store).update_primitive(id, draft)?))
        .await?;
    tracing::info!(admin_id = admin.id, primitive_id = id, "admin updated primitive");
    Ok(ok_json(&primitive))
}

pub(crate) async fn delete_primitive(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(raw_id): Path<String>,
) -> HandlerResult {
    let id = parse_id("id", &raw_id)?;
    state
        .with_store(move |store| Ok(Mutations::new(store).delete_primitive(id)?))
        .await?;
    tracing::info!(admin_id = admin.id, primitive_id = id, "admin deleted primitive");
    Ok(ok_json(&deleted(id)))
}

pub(crate) async fn list_keywords(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> HandlerResult {
    let keywords = state
        .with_store(|store| Ok(store.list_keywords()?))
        .await?;
    Ok(ok_json(&keywords))
}

pub(crate) async fn create_keyword(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    JsonBody(draft): JsonBody<KeywordDraft>,
) -> HandlerResult {
    let keyword = state
        .with_store(move |store| Ok(Mutations::new(store).create_keyword(draft)?))
        .await?;
    tracing::info!(admin_id = admin.id, keyword_id = keyword.id, "admin created keyword");
    Ok(created(&keyword))
}

pub(crate) async fn delete_keyword(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(raw_id): Path<String>,
) -> HandlerResult {
    let id = parse_id("id", &raw_id)?;
    state
        .with_store(move |store| Ok(Mutations::new(store).delete_keyword(id)?))
        .await?;
    tracing::info!(admin_id = admin.id, keyword_id = id, "admin deleted keyword");
    Ok(ok_json(&deleted(id)))
}

/// Two-pass bulk import; `?mode=replace` wipes the catalog first.
pub(crate) async fn import(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    QueryMap(params): QueryMap,
    RawBody(body): RawBody,
) -> HandlerResult {
    let mode = parse_import_mode(&params)?;
    let document = parse_document(&body)?;
    let entries = document.characters.len();
    let report = state
        .with_store(move |store| Ok(import_document(store, document, mode)?))
        .await?;
    tracing::info!(
        admin_id = admin.id,
        mode = mode.as_str(),
        entries,
        characters_created = report.characters_created,
        "admin import finished"
    );
    Ok(ok_json(&report))
}

pub(crate) async fn export(State(state): State<AppState>, _admin: AdminUser) -> HandlerResult {
    let document = state
        .with_store(|store| Ok(export_store(store)?))
        .await?;
    Ok(ok_json(&document))
}
