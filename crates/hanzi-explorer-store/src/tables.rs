// SPDX-License-Identifier: Apache-2.0

use crate::row_decode::{
    character_from_row, keyword_from_row, primitive_from_row, user_from_row, CHARACTER_COLUMNS,
    KEYWORD_COLUMNS, PRIMITIVE_COLUMNS, USER_COLUMNS,
};
use crate::StoreError;
use hanzi_explorer_core::unix_millis;
use hanzi_explorer_model::{
    CatalogCounts, CatalogSnapshot, Character, CharacterDraft, CharacterId, Keyword,
    KeywordDraft, KeywordId, KeywordLink, Primitive, PrimitiveDraft, PrimitiveId, PrimitiveLink,
    User, UserId,
};
use rusqlite::{params, Connection, OptionalExtension};

/// Table-level operations over one connection or open transaction.
///
/// Every method is a single statement group with no transaction handling of
/// its own; atomicity comes from the caller (`EntityStore::write`).
pub struct CatalogTx<'c> {
    conn: &'c Connection,
}

fn dedupe_ids(ids: &[i64]) -> Vec<i64> {
    let mut out: Vec<i64> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(id) {
            out.push(*id);
        }
    }
    out
}

fn count(conn: &Connection, table: &str) -> Result<u64, StoreError> {
    let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?;
    Ok(u64::try_from(n).unwrap_or(0))
}

impl<'c> CatalogTx<'c> {
    #[must_use]
    pub(crate) fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    // characters

    pub fn insert_character(&self, draft: &CharacterDraft) -> Result<Character, StoreError> {
        let now = unix_millis();
        self.conn.execute(
            "INSERT INTO characters (hanzi, heisig_index, story, strokes, pinyin, traditional,
               volume, chapter, created_at_ms, updated_at_ms)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
            params![
                draft.hanzi,
                draft.heisig_index,
                draft.story,
                draft.strokes,
                draft.pinyin,
                draft.traditional,
                draft.volume,
                draft.chapter,
                now
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.require_character(id)
    }

    pub fn update_character(
        &self,
        id: CharacterId,
        draft: &CharacterDraft,
    ) -> Result<Character, StoreError> {
        let changed = self.conn.execute(
            "UPDATE characters SET hanzi = ?2, heisig_index = ?3, story = ?4, strokes = ?5,
               pinyin = ?6, traditional = ?7, volume = ?8, chapter = ?9, updated_at_ms = ?10
             WHERE id = ?1",
            params![
                id,
                draft.hanzi,
                draft.heisig_index,
                draft.story,
                draft.strokes,
                draft.pinyin,
                draft.traditional,
                draft.volume,
                draft.chapter,
                unix_millis()
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("character", id));
        }
        self.require_character(id)
    }

    pub fn delete_character(&self, id: CharacterId) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM characters WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::not_found("character", id));
        }
        Ok(())
    }

    pub fn get_character(&self, id: CharacterId) -> Result<Option<Character>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {CHARACTER_COLUMNS} FROM characters WHERE id = ?1"),
                params![id],
                character_from_row,
            )
            .optional()?)
    }

    fn require_character(&self, id: CharacterId) -> Result<Character, StoreError> {
        self.get_character(id)?
            .ok_or_else(|| StoreError::not_found("character", id))
    }

    pub fn character_by_hanzi(&self, hanzi: &str) -> Result<Option<Character>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {CHARACTER_COLUMNS} FROM characters WHERE hanzi = ?1"),
                params![hanzi],
                character_from_row,
            )
            .optional()?)
    }

    pub fn character_by_index(&self, heisig_index: i64) -> Result<Option<Character>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {CHARACTER_COLUMNS} FROM characters WHERE heisig_index = ?1"),
                params![heisig_index],
                character_from_row,
            )
            .optional()?)
    }

    pub fn list_characters(&self) -> Result<Vec<Character>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CHARACTER_COLUMNS} FROM characters ORDER BY heisig_index, id"
        ))?;
        let rows = stmt.query_map([], character_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    // primitives

    pub fn insert_primitive(&self, draft: &PrimitiveDraft) -> Result<Primitive, StoreError> {
        let now = unix_millis();
        self.conn.execute(
            "INSERT INTO primitives (name, symbol, meaning, notes, created_at_ms, updated_at_ms)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![draft.name, draft.symbol, draft.meaning, draft.notes, now],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_primitive(id)?
            .ok_or_else(|| StoreError::not_found("primitive", id))
    }

    pub fn update_primitive(
        &self,
        id: PrimitiveId,
        draft: &PrimitiveDraft,
    ) -> Result<Primitive, StoreError> {
        let changed = self.conn.execute(
            "UPDATE primitives SET name = ?2, symbol = ?3, meaning = ?4, notes = ?5,
               updated_at_ms = ?6
             WHERE id = ?1",
            params![
                id,
                draft.name,
                draft.symbol,
                draft.meaning,
                draft.notes,
                unix_millis()
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("primitive", id));
        }
        self.get_primitive(id)?
            .ok_or_else(|| StoreError::not_found("primitive", id))
    }

    pub fn delete_primitive(&self, id: PrimitiveId) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM primitives WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::not_found("primitive", id));
        }
        Ok(())
    }

    pub fn get_primitive(&self, id: PrimitiveId) -> Result<Option<Primitive>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {PRIMITIVE_COLUMNS} FROM primitives WHERE id = ?1"),
                params![id],
                primitive_from_row,
            )
            .optional()?)
    }

    pub fn primitive_by_name(&self, name: &str) -> Result<Option<Primitive>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {PRIMITIVE_COLUMNS} FROM primitives WHERE name = ?1"),
                params![name],
                primitive_from_row,
            )
            .optional()?)
    }

    pub fn list_primitives(&self) -> Result<Vec<Primitive>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PRIMITIVE_COLUMNS} FROM primitives ORDER BY name, id"
        ))?;
        let rows = stmt.query_map([], primitive_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    // keywords

    pub fn insert_keyword(&self, draft: &KeywordDraft) -> Result<Keyword, StoreError> {
        self.conn.execute(
            "INSERT INTO keywords (word, notes, created_at_ms) VALUES (?1, ?2, ?3)",
            params![draft.word, draft.notes, unix_millis()],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_keyword(id)?
            .ok_or_else(|| StoreError::not_found("keyword", id))
    }

    pub fn delete_keyword(&self, id: KeywordId) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM keywords WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::not_found("keyword", id));
        }
        Ok(())
    }

    pub fn get_keyword(&self, id: KeywordId) -> Result<Option<Keyword>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {KEYWORD_COLUMNS} FROM keywords WHERE id = ?1"),
                params![id],
                keyword_from_row,
            )
            .optional()?)
    }

    pub fn keyword_by_word(&self, word: &str) -> Result<Option<Keyword>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {KEYWORD_COLUMNS} FROM keywords WHERE word = ?1"),
                params![word],
                keyword_from_row,
            )
            .optional()?)
    }

    pub fn list_keywords(&self) -> Result<Vec<Keyword>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {KEYWORD_COLUMNS} FROM keywords ORDER BY word, id"
        ))?;
        let rows = stmt.query_map([], keyword_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    // relations

    /// Swaps the full primitive set of a character. Repeated ids collapse to
    /// their first occurrence; list order becomes `position`.
    pub fn replace_character_primitives(
        &self,
        character_id: CharacterId,
        primitive_ids: &[PrimitiveId],
    ) -> Result<(), StoreError> {
        self.require_character(character_id)?;
        let ids = dedupe_ids(primitive_ids);
        for id in &ids {
            if self.get_primitive(*id)?.is_none() {
                return Err(StoreError::not_found("primitive", id));
            }
        }
        self.conn.execute(
            "DELETE FROM character_primitives WHERE character_id = ?1",
            params![character_id],
        )?;
        let mut stmt = self.conn.prepare(
            "INSERT INTO character_primitives (character_id, primitive_id, position)
             VALUES (?1, ?2, ?3)",
        )?;
        for (position, id) in ids.iter().enumerate() {
            stmt.execute(params![character_id, id, position as i64])?;
        }
        Ok(())
    }

    pub fn replace_character_keywords(
        &self,
        character_id: CharacterId,
        keyword_ids: &[KeywordId],
    ) -> Result<(), StoreError> {
        self.require_character(character_id)?;
        let ids = dedupe_ids(keyword_ids);
        for id in &ids {
            if self.get_keyword(*id)?.is_none() {
                return Err(StoreError::not_found("keyword", id));
            }
        }
        self.conn.execute(
            "DELETE FROM character_keywords WHERE character_id = ?1",
            params![character_id],
        )?;
        let mut stmt = self.conn.prepare(
            "INSERT INTO character_keywords (character_id, keyword_id, position)
             VALUES (?1, ?2, ?3)",
        )?;
        for (position, id) in ids.iter().enumerate() {
            stmt.execute(params![character_id, id, position as i64])?;
        }
        Ok(())
    }

    pub fn primitive_ids_for(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<PrimitiveId>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT primitive_id FROM character_primitives
             WHERE character_id = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![character_id], |r| r.get(0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn keyword_ids_for(&self, character_id: CharacterId) -> Result<Vec<KeywordId>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT keyword_id FROM character_keywords
             WHERE character_id = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![character_id], |r| r.get(0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn characters_using_primitive(
        &self,
        primitive_id: PrimitiveId,
    ) -> Result<Vec<Character>, StoreError> {
        let columns = CHARACTER_COLUMNS
            .split(", ")
            .map(|c| format!("c.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {columns} FROM characters c
             JOIN character_primitives cp ON cp.character_id = c.id
             WHERE cp.primitive_id = ?1 ORDER BY c.heisig_index"
        ))?;
        let rows = stmt.query_map(params![primitive_id], character_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn primitive_links(&self) -> Result<Vec<PrimitiveLink>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT character_id, primitive_id, position FROM character_primitives
             ORDER BY character_id, position",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok(PrimitiveLink {
                character_id: r.get(0)?,
                primitive_id: r.get(1)?,
                position: r.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn keyword_links(&self) -> Result<Vec<KeywordLink>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT character_id, keyword_id, position FROM character_keywords
             ORDER BY character_id, position",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok(KeywordLink {
                character_id: r.get(0)?,
                keyword_id: r.get(1)?,
                position: r.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    // users

    pub fn insert_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User, StoreError> {
        self.conn.execute(
            "INSERT INTO users (username, email, password_hash, is_admin, registered_at_ms)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![username, email, password_hash, is_admin, unix_millis()],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_user(id)?
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    pub fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                params![id],
                user_from_row,
            )
            .optional()?)
    }

    pub fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
                params![username],
                user_from_row,
            )
            .optional()?)
    }

    pub fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
                params![email],
                user_from_row,
            )
            .optional()?)
    }

    pub fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))?;
        let rows = stmt.query_map([], user_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn set_user_admin(&self, id: UserId, is_admin: bool) -> Result<User, StoreError> {
        let changed = self.conn.execute(
            "UPDATE users SET is_admin = ?2 WHERE id = ?1",
            params![id, is_admin],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("user", id));
        }
        self.get_user(id)?
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    // catalog-wide

    /// Removes every character, primitive and keyword. Users are kept.
    pub fn clear_catalog(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            DELETE FROM character_primitives;
            DELETE FROM character_keywords;
            DELETE FROM characters;
            DELETE FROM primitives;
            DELETE FROM keywords;
            ",
        )?;
        Ok(())
    }

    pub fn counts(&self) -> Result<CatalogCounts, StoreError> {
        Ok(CatalogCounts {
            characters: count(self.conn, "characters")?,
            primitives: count(self.conn, "primitives")?,
            keywords: count(self.conn, "keywords")?,
            users: count(self.conn, "users")?,
        })
    }

    pub fn snapshot(&self) -> Result<CatalogSnapshot, StoreError> {
        Ok(CatalogSnapshot {
            characters: self.list_characters()?,
            primitives: self.list_primitives()?,
            keywords: self.list_keywords()?,
            primitive_links: self.primitive_links()?,
            keyword_links: self.keyword_links()?,
        })
    }
}
