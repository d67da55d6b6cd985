// SPDX-License-Identifier: Apache-2.0

use hanzi_explorer_model::{Character, Keyword, Primitive, User};
use rusqlite::Row;

pub(crate) const CHARACTER_COLUMNS: &str = "id, hanzi, heisig_index, story, strokes, pinyin, \
     traditional, volume, chapter, created_at_ms, updated_at_ms";
pub(crate) const PRIMITIVE_COLUMNS: &str =
    "id, name, symbol, meaning, notes, created_at_ms, updated_at_ms";
pub(crate) const KEYWORD_COLUMNS: &str = "id, word, notes, created_at_ms";
pub(crate) const USER_COLUMNS: &str =
    "id, username, email, password_hash, is_admin, registered_at_ms";

pub(crate) fn character_from_row(row: &Row<'_>) -> rusqlite::Result<Character> {
    Ok(Character {
        id: row.get(0)?,
        hanzi: row.get(1)?,
        heisig_index: row.get(2)?,
        story: row.get(3)?,
        strokes: row.get(4)?,
        pinyin: row.get(5)?,
        traditional: row.get(6)?,
        volume: row.get(7)?,
        chapter: row.get(8)?,
        created_at_ms: row.get(9)?,
        updated_at_ms: row.get(10)?,
    })
}

pub(crate) fn primitive_from_row(row: &Row<'_>) -> rusqlite::Result<Primitive> {
    Ok(Primitive {
        id: row.get(0)?,
        name: row.get(1)?,
        symbol: row.get(2)?,
        meaning: row.get(3)?,
        notes: row.get(4)?,
        created_at_ms: row.get(5)?,
        updated_at_ms: row.get(6)?,
    })
}

pub(crate) fn keyword_from_row(row: &Row<'_>) -> rusqlite::Result<Keyword> {
    Ok(Keyword {
        id: row.get(0)?,
        word: row.get(1)?,
        notes: row.get(2)?,
        created_at_ms: row.get(3)?,
    })
}

pub(crate) fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        is_admin: row.get(4)?,
        registered_at_ms: row.get(5)?,
    })
}
