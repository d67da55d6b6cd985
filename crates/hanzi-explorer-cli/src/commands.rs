// SPDX-License-Identifier: Apache-2.0

use crate::errors::CliError;
use hanzi_explorer_core::password::DEFAULT_ROUNDS;
use hanzi_explorer_ingest::{export_path, import_path, ImportMode};
use hanzi_explorer_model::NewUser;
use hanzi_explorer_query::{CatalogQuery, CharacterFilter, SearchRequest, RECENT_LIMIT};
use hanzi_explorer_store::{EntityStore, Mutations};
use serde_json::{json, Value};
use std::path::Path;

pub(crate) const ENV_HANZI_PASSWORD_ROUNDS: &str = "HANZI_PASSWORD_ROUNDS";

pub(crate) fn password_rounds() -> u32 {
    std::env::var(ENV_HANZI_PASSWORD_ROUNDS)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|rounds| *rounds > 0)
        .unwrap_or(DEFAULT_ROUNDS)
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, CliError> {
    serde_json::to_value(value).map_err(|e| CliError::internal(e.to_string()))
}

pub(crate) fn init_db(db_path: &Path) -> Result<Value, CliError> {
    let store = EntityStore::open(db_path)?;
    Ok(json!({
        "command": "init-db",
        "database": db_path.display().to_string(),
        "schema_version": store.schema_version()?,
    }))
}

pub(crate) fn import_json(db_path: &Path, input: &Path, replace: bool) -> Result<Value, CliError> {
    let mode = if replace {
        ImportMode::Replace
    } else {
        ImportMode::Append
    };
    let mut store = EntityStore::open(db_path)?;
    let report = import_path(&mut store, input, mode)?;
    tracing::info!(
        mode = mode.as_str(),
        characters_created = report.characters_created,
        "import finished"
    );
    Ok(json!({
        "command": "import-json",
        "input": input.display().to_string(),
        "report": to_value(&report)?,
    }))
}

pub(crate) fn export_json(db_path: &Path, out: &Path) -> Result<Value, CliError> {
    let store = EntityStore::open(db_path)?;
    let written = export_path(&store, out)?;
    Ok(json!({
        "command": "export-json",
        "out": out.display().to_string(),
        "characters": written,
    }))
}

pub(crate) struct AdminRequest {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) promote_existing: bool,
}

pub(crate) fn create_admin(
    db_path: &Path,
    request: AdminRequest,
    rounds: u32,
) -> Result<Value, CliError> {
    let mut store = EntityStore::open(db_path)?;
    let username = request.username.trim().to_string();
    if request.promote_existing && store.user_by_username(&username)?.is_some() {
        let user = Mutations::new(&mut store).set_admin(&username, true)?;
        return Ok(json!({
            "command": "create-admin",
            "status": "promoted",
            "user": to_value(&user)?,
        }));
    }
    let user = Mutations::new(&mut store)
        .with_password_rounds(rounds)
        .create_user(NewUser {
            username: request.username,
            email: request.email,
            password: request.password,
            is_admin: true,
        })?;
    Ok(json!({
        "command": "create-admin",
        "status": "created",
        "user": to_value(&user)?,
    }))
}

pub(crate) fn stats(db_path: &Path) -> Result<Value, CliError> {
    let store = EntityStore::open(db_path)?;
    let counts = store.counts()?;
    let snapshot = store.snapshot()?;
    let recent: Vec<Value> = CatalogQuery::new(&snapshot)
        .recent_characters(RECENT_LIMIT)
        .into_iter()
        .map(|view| json!({"hanzi": view.hanzi, "heisig_index": view.heisig_index, "keyword": view.keyword}))
        .collect();
    Ok(json!({
        "command": "stats",
        "counts": to_value(&counts)?,
        "recent": recent,
    }))
}

pub(crate) fn search(
    db_path: &Path,
    q: &str,
    volume: Option<i64>,
    chapter: Option<i64>,
) -> Result<Value, CliError> {
    let store = EntityStore::open(db_path)?;
    let snapshot = store.snapshot()?;
    let request = SearchRequest::new(q).with_filter(CharacterFilter::new(volume, chapter));
    let results = CatalogQuery::new(&snapshot).search(&request);
    Ok(json!({
        "command": "search",
        "query": q,
        "count": results.len(),
        "results": to_value(&results)?,
    }))
}

pub(crate) fn graph(db_path: &Path) -> Result<Value, CliError> {
    let store = EntityStore::open(db_path)?;
    let snapshot = store.snapshot()?;
    to_value(&CatalogQuery::new(&snapshot).build_graph())
}
