// SPDX-License-Identifier: Apache-2.0

use crate::StoreError;
use rusqlite::Connection;
use std::time::Duration;

pub const SCHEMA_VERSION: i64 = 1;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA_V1: &str = "
CREATE TABLE IF NOT EXISTS characters (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  hanzi TEXT NOT NULL UNIQUE,
  heisig_index INTEGER NOT NULL UNIQUE CHECK (heisig_index >= 1),
  story TEXT,
  strokes INTEGER,
  pinyin TEXT,
  traditional TEXT,
  volume INTEGER,
  chapter INTEGER,
  created_at_ms INTEGER NOT NULL,
  updated_at_ms INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS primitives (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL UNIQUE,
  symbol TEXT NOT NULL,
  meaning TEXT,
  notes TEXT,
  created_at_ms INTEGER NOT NULL,
  updated_at_ms INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS keywords (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  word TEXT NOT NULL UNIQUE,
  notes TEXT,
  created_at_ms INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS users (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  username TEXT NOT NULL UNIQUE,
  email TEXT NOT NULL UNIQUE,
  password_hash TEXT NOT NULL,
  is_admin INTEGER NOT NULL DEFAULT 0,
  registered_at_ms INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS character_primitives (
  character_id INTEGER NOT NULL REFERENCES characters(id) ON DELETE CASCADE,
  primitive_id INTEGER NOT NULL REFERENCES primitives(id) ON DELETE CASCADE,
  position INTEGER NOT NULL,
  PRIMARY KEY (character_id, primitive_id)
) WITHOUT ROWID;
CREATE TABLE IF NOT EXISTS character_keywords (
  character_id INTEGER NOT NULL REFERENCES characters(id) ON DELETE CASCADE,
  keyword_id INTEGER NOT NULL REFERENCES keywords(id) ON DELETE CASCADE,
  position INTEGER NOT NULL,
  PRIMARY KEY (character_id, keyword_id)
) WITHOUT ROWID;
CREATE INDEX IF NOT EXISTS idx_characters_volume_chapter ON characters(volume, chapter);
CREATE INDEX IF NOT EXISTS idx_character_primitives_primitive ON character_primitives(primitive_id);
CREATE INDEX IF NOT EXISTS idx_character_keywords_keyword ON character_keywords(keyword_id);
";

/// Per-connection settings. Foreign keys are off by default in SQLite and
/// the cascade rules depend on them.
pub(crate) fn configure(conn: &Connection) -> Result<(), StoreError> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch(
        "
        PRAGMA foreign_keys=ON;
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;
        PRAGMA temp_store=MEMORY;
        ",
    )?;
    Ok(())
}

pub(crate) fn schema_version(conn: &Connection) -> Result<i64, StoreError> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

pub(crate) fn migrate(conn: &mut Connection) -> Result<(), StoreError> {
    let current = schema_version(conn)?;
    if current > SCHEMA_VERSION {
        return Err(StoreError::backend(format!(
            "database schema version {current} is newer than supported version {SCHEMA_VERSION}"
        )));
    }
    if current == SCHEMA_VERSION {
        return Ok(());
    }
    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_V1)?;
    tx.execute_batch(&format!("PRAGMA user_version={SCHEMA_VERSION};"))?;
    tx.commit()?;
    tracing::info!(from = current, to = SCHEMA_VERSION, "store schema migrated");
    Ok(())
}
