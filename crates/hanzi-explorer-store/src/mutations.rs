// SPDX-License-Identifier: Apache-2.0

//! Validated create/update/delete flows. Each operation is one `IMMEDIATE`
//! transaction, so uniqueness checks and the write cannot interleave with
//! another writer.

use crate::tables::CatalogTx;
use crate::{EntityStore, StoreError, StoreErrorCode};
use hanzi_explorer_core::password::{hash_password_with_rounds, verify_password, DEFAULT_ROUNDS};
use hanzi_explorer_model::{
    Character, CharacterDraft, CharacterId, FieldError, Keyword, KeywordDraft, KeywordId,
    NewUser, Primitive, PrimitiveDraft, PrimitiveId, User, ValidationError,
};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    NotFound { entity: &'static str, key: String },
    DuplicateKey { fields: Vec<FieldError> },
    Validation { fields: Vec<FieldError> },
    Store(StoreError),
}

impl MutationError {
    fn not_found(entity: &'static str, key: impl Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

impl Display for MutationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, key } => write!(f, "{entity} {key} not found"),
            Self::DuplicateKey { fields } => {
                let names: Vec<&str> = fields.iter().map(|x| x.field.as_str()).collect();
                write!(f, "duplicate key: {}", names.join(", "))
            }
            Self::Validation { fields } => write!(
                f,
                "{}",
                ValidationError {
                    fields: fields.clone()
                }
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for MutationError {}

impl From<ValidationError> for MutationError {
    fn from(value: ValidationError) -> Self {
        Self::Validation {
            fields: value.fields,
        }
    }
}

impl From<StoreError> for MutationError {
    fn from(value: StoreError) -> Self {
        match value.code {
            // A write that lost a race against a pre-check lands here.
            StoreErrorCode::DuplicateKey => Self::DuplicateKey {
                fields: vec![FieldError::new(
                    value.field.unwrap_or_else(|| "key".to_string()),
                    "already exists",
                )],
            },
            _ => Self::Store(value),
        }
    }
}

fn duplicate_result(fields: Vec<FieldError>) -> Result<(), MutationError> {
    if fields.is_empty() {
        Ok(())
    } else {
        Err(MutationError::DuplicateKey { fields })
    }
}

/// Mutation service over an exclusively borrowed store.
pub struct Mutations<'s> {
    store: &'s mut EntityStore,
    password_rounds: u32,
}

impl<'s> Mutations<'s> {
    pub fn new(store: &'s mut EntityStore) -> Self {
        Self {
            store,
            password_rounds: DEFAULT_ROUNDS,
        }
    }

    /// PBKDF2 work factor for newly hashed passwords.
    #[must_use]
    pub fn with_password_rounds(mut self, rounds: u32) -> Self {
        self.password_rounds = rounds.max(1);
        self
    }

    pub fn create_character(&mut self, draft: CharacterDraft) -> Result<Character, MutationError> {
        let draft = draft.normalized();
        draft.validate()?;
        let character = self.store.write(|tx| {
            check_character_unique(tx, &draft, None)?;
            let primitive_ids = resolve_primitives(tx, &draft.primitives)?;
            let keyword_ids = resolve_keywords(tx, &draft.keywords)?;
            let character = tx.insert_character(&draft)?;
            tx.replace_character_primitives(character.id, &primitive_ids)?;
            tx.replace_character_keywords(character.id, &keyword_ids)?;
            Ok::<_, MutationError>(character)
        })?;
        tracing::info!(
            character_id = character.id,
            hanzi = %character.hanzi,
            heisig_index = character.heisig_index,
            "character created"
        );
        Ok(character)
    }

    pub fn update_character(
        &mut self,
        id: CharacterId,
        draft: CharacterDraft,
    ) -> Result<Character, MutationError> {
        let draft = draft.normalized();
        draft.validate()?;
        let character = self.store.write(|tx| {
            if tx.get_character(id)?.is_none() {
                return Err(MutationError::not_found("character", id));
            }
            check_character_unique(tx, &draft, Some(id))?;
            let primitive_ids = resolve_primitives(tx, &draft.primitives)?;
            let keyword_ids = resolve_keywords(tx, &draft.keywords)?;
            let character = tx.update_character(id, &draft)?;
            tx.replace_character_primitives(id, &primitive_ids)?;
            tx.replace_character_keywords(id, &keyword_ids)?;
            Ok(character)
        })?;
        tracing::info!(character_id = id, "character updated");
        Ok(character)
    }

    pub fn delete_character(&mut self, id: CharacterId) -> Result<(), MutationError> {
        self.store.write(|tx| match tx.delete_character(id) {
            Err(e) if e.code == StoreErrorCode::NotFound => {
                Err(MutationError::not_found("character", id))
            }
            other => other.map_err(MutationError::from),
        })?;
        tracing::info!(character_id = id, "character deleted");
        Ok(())
    }

    pub fn create_primitive(&mut self, draft: PrimitiveDraft) -> Result<Primitive, MutationError> {
        let draft = draft.normalized();
        draft.validate()?;
        let primitive = self.store.write(|tx| {
            check_primitive_unique(tx, &draft, None)?;
            Ok::<_, MutationError>(tx.insert_primitive(&draft)?)
        })?;
        tracing::info!(primitive_id = primitive.id, name = %primitive.name, "primitive created");
        Ok(primitive)
    }

    pub fn update_primitive(
        &mut self,
        id: PrimitiveId,
        draft: PrimitiveDraft,
    ) -> Result<Primitive, MutationError> {
        let draft = draft.normalized();
        draft.validate()?;
        let primitive = self.store.write(|tx| {
            if tx.get_primitive(id)?.is_none() {
                return Err(MutationError::not_found("primitive", id));
            }
            check_primitive_unique(tx, &draft, Some(id))?;
            Ok(tx.update_primitive(id, &draft)?)
        })?;
        tracing::info!(primitive_id = id, "primitive updated");
        Ok(primitive)
    }

    pub fn delete_primitive(&mut self, id: PrimitiveId) -> Result<(), MutationError> {
        self.store.write(|tx| match tx.delete_primitive(id) {
            Err(e) if e.code == StoreErrorCode::NotFound => {
                Err(MutationError::not_found("primitive", id))
            }
            other => other.map_err(MutationError::from),
        })?;
        tracing::info!(primitive_id = id, "primitive deleted");
        Ok(())
    }

    pub fn create_keyword(&mut self, draft: KeywordDraft) -> Result<Keyword, MutationError> {
        let draft = draft.normalized();
        draft.validate()?;
        let keyword = self.store.write(|tx| {
            if tx.keyword_by_word(&draft.word)?.is_some() {
                return Err(MutationError::DuplicateKey {
                    fields: vec![FieldError::new("word", "already exists")],
                });
            }
            Ok(tx.insert_keyword(&draft)?)
        })?;
        tracing::info!(keyword_id = keyword.id, "keyword created");
        Ok(keyword)
    }

    pub fn delete_keyword(&mut self, id: KeywordId) -> Result<(), MutationError> {
        self.store.write(|tx| match tx.delete_keyword(id) {
            Err(e) if e.code == StoreErrorCode::NotFound => {
                Err(MutationError::not_found("keyword", id))
            }
            other => other.map_err(MutationError::from),
        })?;
        tracing::info!(keyword_id = id, "keyword deleted");
        Ok(())
    }

    /// Registers an account; the password is hashed before it reaches the
    /// store.
    pub fn create_user(&mut self, new_user: NewUser) -> Result<User, MutationError> {
        let new_user = new_user.normalized();
        new_user.validate()?;
        let password_hash = hash_password_with_rounds(&new_user.password, self.password_rounds);
        let user = self.store.write(|tx| {
            let mut dupes = Vec::new();
            if tx.user_by_username(&new_user.username)?.is_some() {
                dupes.push(FieldError::new("username", "already exists"));
            }
            if tx.user_by_email(&new_user.email)?.is_some() {
                dupes.push(FieldError::new("email", "already exists"));
            }
            duplicate_result(dupes)?;
            Ok::<_, MutationError>(tx.insert_user(
                &new_user.username,
                &new_user.email,
                &password_hash,
                new_user.is_admin,
            )?)
        })?;
        tracing::info!(user_id = user.id, is_admin = user.is_admin, "user created");
        Ok(user)
    }

    /// `None` when the user is unknown or the password does not match.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, MutationError> {
        let Some(user) = self.store.user_by_username(username.trim())? else {
            return Ok(None);
        };
        let ok = verify_password(password, &user.password_hash)
            .map_err(|e| StoreError::backend(format!("stored password hash: {e}")))?;
        Ok(ok.then_some(user))
    }

    pub fn set_admin(&mut self, username: &str, is_admin: bool) -> Result<User, MutationError> {
        let user = self.store.write(|tx| {
            let user = tx
                .user_by_username(username)?
                .ok_or_else(|| MutationError::not_found("user", username))?;
            Ok::<_, MutationError>(tx.set_user_admin(user.id, is_admin)?)
        })?;
        tracing::info!(user_id = user.id, is_admin, "user admin flag changed");
        Ok(user)
    }
}

fn check_character_unique(
    tx: &CatalogTx<'_>,
    draft: &CharacterDraft,
    exclude: Option<CharacterId>,
) -> Result<(), MutationError> {
    let mut dupes = Vec::new();
    if let Some(existing) = tx.character_by_hanzi(&draft.hanzi)? {
        if Some(existing.id) != exclude {
            dupes.push(FieldError::new("hanzi", format!("'{}' already exists", draft.hanzi)));
        }
    }
    if let Some(existing) = tx.character_by_index(draft.heisig_index)? {
        if Some(existing.id) != exclude {
            dupes.push(FieldError::new(
                "heisig_index",
                format!("{} already exists", draft.heisig_index),
            ));
        }
    }
    duplicate_result(dupes)
}

fn check_primitive_unique(
    tx: &CatalogTx<'_>,
    draft: &PrimitiveDraft,
    exclude: Option<PrimitiveId>,
) -> Result<(), MutationError> {
    match tx.primitive_by_name(&draft.name)? {
        Some(existing) if Some(existing.id) != exclude => Err(MutationError::DuplicateKey {
            fields: vec![FieldError::new(
                "name",
                format!("'{}' already exists", draft.name),
            )],
        }),
        _ => Ok(()),
    }
}

fn resolve_primitives(
    tx: &CatalogTx<'_>,
    names: &[String],
) -> Result<Vec<PrimitiveId>, MutationError> {
    let mut ids = Vec::with_capacity(names.len());
    let mut unknown = Vec::new();
    for name in names {
        match tx.primitive_by_name(name)? {
            Some(p) => ids.push(p.id),
            None => unknown.push(name.as_str()),
        }
    }
    if !unknown.is_empty() {
        return Err(MutationError::Validation {
            fields: vec![FieldError::new(
                "primitives",
                format!("unknown primitive: {}", unknown.join(", ")),
            )],
        });
    }
    Ok(ids)
}

/// Keywords are lightweight glosses; unknown words are created on the fly.
fn resolve_keywords(tx: &CatalogTx<'_>, words: &[String]) -> Result<Vec<KeywordId>, MutationError> {
    let mut ids = Vec::with_capacity(words.len());
    for word in words {
        let keyword = match tx.keyword_by_word(word)? {
            Some(k) => k,
            None => tx.insert_keyword(&KeywordDraft::new(word.clone()))?,
        };
        ids.push(keyword.id);
    }
    Ok(ids)
}
