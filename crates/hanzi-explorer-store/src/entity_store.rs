// SPDX-License-Identifier: Apache-2.0

use crate::schema;
use crate::tables::CatalogTx;
use crate::StoreError;
use hanzi_explorer_model::{
    CatalogCounts, CatalogSnapshot, Character, CharacterDraft, CharacterId, Keyword,
    KeywordDraft, KeywordId, Primitive, PrimitiveDraft, PrimitiveId, User, UserId,
};
use rusqlite::{Connection, TransactionBehavior};
use std::fs;
use std::path::{Path, PathBuf};

/// Durable keyed storage for the catalog entities and their join tables.
pub struct EntityStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for EntityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl EntityStore {
    /// Opens (creating if needed) the database file and brings the schema up
    /// to date.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::backend(format!("create {}: {e}", parent.display()))
            })?;
        }
        let conn = Connection::open(path)?;
        let mut store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        schema::configure(&store.conn)?;
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn, path: None };
        schema::configure(&store.conn)?;
        store.migrate()?;
        Ok(store)
    }

    pub fn migrate(&mut self) -> Result<(), StoreError> {
        schema::migrate(&mut self.conn)
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn schema_version(&self) -> Result<i64, StoreError> {
        schema::schema_version(&self.conn)
    }

    pub fn ping(&self) -> Result<(), StoreError> {
        self.conn.query_row("SELECT 1", [], |r| r.get::<_, i64>(0))?;
        Ok(())
    }

    /// Autocommit access for single-statement reads.
    #[must_use]
    pub fn read(&self) -> CatalogTx<'_> {
        CatalogTx::new(&self.conn)
    }

    /// Runs `f` inside one `IMMEDIATE` transaction, committing only when it
    /// returns `Ok`.
    pub fn write<T, E>(&mut self, f: impl FnOnce(&CatalogTx<'_>) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(StoreError::from)?;
        let out = f(&CatalogTx::new(&tx))?;
        tx.commit().map_err(StoreError::from)?;
        Ok(out)
    }

    /// Whole-catalog copy read inside a single transaction.
    pub fn snapshot(&self) -> Result<CatalogSnapshot, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        let snapshot = CatalogTx::new(&tx).snapshot()?;
        tx.commit()?;
        Ok(snapshot)
    }

    pub fn counts(&self) -> Result<CatalogCounts, StoreError> {
        self.read().counts()
    }

    pub fn insert_character(&mut self, draft: &CharacterDraft) -> Result<Character, StoreError> {
        self.write(|tx| tx.insert_character(draft))
    }

    pub fn update_character(
        &mut self,
        id: CharacterId,
        draft: &CharacterDraft,
    ) -> Result<Character, StoreError> {
        self.write(|tx| tx.update_character(id, draft))
    }

    pub fn delete_character(&mut self, id: CharacterId) -> Result<(), StoreError> {
        self.write(|tx| tx.delete_character(id))
    }

    pub fn get_character(&self, id: CharacterId) -> Result<Option<Character>, StoreError> {
        self.read().get_character(id)
    }

    pub fn character_by_hanzi(&self, hanzi: &str) -> Result<Option<Character>, StoreError> {
        self.read().character_by_hanzi(hanzi)
    }

    pub fn list_characters(&self) -> Result<Vec<Character>, StoreError> {
        self.read().list_characters()
    }

    pub fn insert_primitive(&mut self, draft: &PrimitiveDraft) -> Result<Primitive, StoreError> {
        self.write(|tx| tx.insert_primitive(draft))
    }

    pub fn update_primitive(
        &mut self,
        id: PrimitiveId,
        draft: &PrimitiveDraft,
    ) -> Result<Primitive, StoreError> {
        self.write(|tx| tx.update_primitive(id, draft))
    }

    pub fn delete_primitive(&mut self, id: PrimitiveId) -> Result<(), StoreError> {
        self.write(|tx| tx.delete_primitive(id))
    }

    pub fn get_primitive(&self, id: PrimitiveId) -> Result<Option<Primitive>, StoreError> {
        self.read().get_primitive(id)
    }

    pub fn primitive_by_name(&self, name: &str) -> Result<Option<Primitive>, StoreError> {
        self.read().primitive_by_name(name)
    }

    pub fn list_primitives(&self) -> Result<Vec<Primitive>, StoreError> {
        self.read().list_primitives()
    }

    pub fn insert_keyword(&mut self, draft: &KeywordDraft) -> Result<Keyword, StoreError> {
        self.write(|tx| tx.insert_keyword(draft))
    }

    pub fn delete_keyword(&mut self, id: KeywordId) -> Result<(), StoreError> {
        self.write(|tx| tx.delete_keyword(id))
    }

    pub fn keyword_by_word(&self, word: &str) -> Result<Option<Keyword>, StoreError> {
        self.read().keyword_by_word(word)
    }

    pub fn list_keywords(&self) -> Result<Vec<Keyword>, StoreError> {
        self.read().list_keywords()
    }

    pub fn replace_character_primitives(
        &mut self,
        character_id: CharacterId,
        primitive_ids: &[PrimitiveId],
    ) -> Result<(), StoreError> {
        self.write(|tx| tx.replace_character_primitives(character_id, primitive_ids))
    }

    pub fn replace_character_keywords(
        &mut self,
        character_id: CharacterId,
        keyword_ids: &[KeywordId],
    ) -> Result<(), StoreError> {
        self.write(|tx| tx.replace_character_keywords(character_id, keyword_ids))
    }

    pub fn primitive_ids_for(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<PrimitiveId>, StoreError> {
        self.read().primitive_ids_for(character_id)
    }

    pub fn keyword_ids_for(&self, character_id: CharacterId) -> Result<Vec<KeywordId>, StoreError> {
        self.read().keyword_ids_for(character_id)
    }

    pub fn characters_using_primitive(
        &self,
        primitive_id: PrimitiveId,
    ) -> Result<Vec<Character>, StoreError> {
        self.read().characters_using_primitive(primitive_id)
    }

    pub fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.read().get_user(id)
    }

    pub fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.read().user_by_username(username)
    }

    pub fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.read().list_users()
    }
}
