// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const HANZI_MAX_CHARS: usize = 8;
pub const SYMBOL_MAX_CHARS: usize = 8;
pub const KEYWORD_MAX_LEN: usize = 100;
pub const PRIMITIVE_NAME_MAX_LEN: usize = 50;
pub const PINYIN_MAX_LEN: usize = 20;
pub const STROKES_MAX: i64 = 64;
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 64;
pub const EMAIL_MAX_LEN: usize = 120;
pub const PASSWORD_MIN_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Every field-level problem found in one input, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    #[must_use]
    pub fn single(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            fields: vec![FieldError::new(field, reason)],
        }
    }

    pub fn push(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.fields.push(FieldError::new(field, reason));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.field.as_str()).collect()
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.fields.iter().map(ToString::to_string).collect();
        write!(f, "validation failed: {}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

fn trimmed_opt(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn dedupe_names(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        let v = v.trim().to_string();
        if !v.is_empty() && !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

fn check_text(
    errors: &mut ValidationError,
    field: &str,
    value: &str,
    max_chars: usize,
    required: bool,
) {
    let count = value.chars().count();
    if required && count == 0 {
        errors.push(field, "is required");
    } else if count > max_chars {
        errors.push(field, format!("must be at most {max_chars} characters"));
    }
}

/// Create/update input for a character. Relationships are given by natural
/// key: primitive names and keyword words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharacterDraft {
    pub hanzi: String,
    pub heisig_index: i64,
    #[serde(default)]
    pub story: Option<String>,
    #[serde(default)]
    pub strokes: Option<i64>,
    #[serde(default)]
    pub pinyin: Option<String>,
    #[serde(default)]
    pub traditional: Option<String>,
    #[serde(default)]
    pub volume: Option<i64>,
    #[serde(default)]
    pub chapter: Option<i64>,
    #[serde(default)]
    pub primitives: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CharacterDraft {
    #[must_use]
    pub fn new(hanzi: impl Into<String>, heisig_index: i64) -> Self {
        Self {
            hanzi: hanzi.into(),
            heisig_index,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_primitives(mut self, names: &[&str]) -> Self {
        self.primitives = names.iter().map(|n| (*n).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_keywords(mut self, words: &[&str]) -> Self {
        self.keywords = words.iter().map(|w| (*w).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_story(mut self, story: &str) -> Self {
        self.story = Some(story.to_string());
        self
    }

    #[must_use]
    pub fn in_chapter(mut self, volume: i64, chapter: i64) -> Self {
        self.volume = Some(volume);
        self.chapter = Some(chapter);
        self
    }

    /// Trims text, turns blank optionals into `None`, drops blank and repeated
    /// relationship names while keeping first-seen order.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            hanzi: self.hanzi.trim().to_string(),
            heisig_index: self.heisig_index,
            story: trimmed_opt(self.story),
            strokes: self.strokes,
            pinyin: trimmed_opt(self.pinyin),
            traditional: trimmed_opt(self.traditional),
            volume: self.volume,
            chapter: self.chapter,
            primitives: dedupe_names(self.primitives),
            keywords: dedupe_names(self.keywords),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        check_text(&mut errors, "hanzi", &self.hanzi, HANZI_MAX_CHARS, true);
        if self.hanzi.chars().any(char::is_whitespace) {
            errors.push("hanzi", "must not contain whitespace");
        }
        if self.heisig_index < 1 {
            errors.push("heisig_index", "must be >= 1");
        }
        if let Some(strokes) = self.strokes {
            if !(1..=STROKES_MAX).contains(&strokes) {
                errors.push("strokes", format!("must be between 1 and {STROKES_MAX}"));
            }
        }
        if let Some(pinyin) = &self.pinyin {
            check_text(&mut errors, "pinyin", pinyin, PINYIN_MAX_LEN, false);
        }
        if let Some(traditional) = &self.traditional {
            check_text(&mut errors, "traditional", traditional, HANZI_MAX_CHARS, false);
        }
        if self.volume.is_some_and(|v| v < 1) {
            errors.push("volume", "must be >= 1");
        }
        if self.chapter.is_some_and(|c| c < 1) {
            errors.push("chapter", "must be >= 1");
        }
        if self
            .primitives
            .iter()
            .any(|p| p.chars().count() > PRIMITIVE_NAME_MAX_LEN)
        {
            errors.push(
                "primitives",
                format!("names must be at most {PRIMITIVE_NAME_MAX_LEN} characters"),
            );
        }
        if self
            .keywords
            .iter()
            .any(|k| k.chars().count() > KEYWORD_MAX_LEN)
        {
            errors.push(
                "keywords",
                format!("words must be at most {KEYWORD_MAX_LEN} characters"),
            );
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrimitiveDraft {
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub meaning: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PrimitiveDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_meaning(mut self, meaning: &str) -> Self {
        self.meaning = Some(meaning.to_string());
        self
    }

    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            symbol: self.symbol.trim().to_string(),
            meaning: trimmed_opt(self.meaning),
            notes: trimmed_opt(self.notes),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        check_text(&mut errors, "name", &self.name, PRIMITIVE_NAME_MAX_LEN, true);
        check_text(&mut errors, "symbol", &self.symbol, SYMBOL_MAX_CHARS, true);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeywordDraft {
    pub word: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl KeywordDraft {
    #[must_use]
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            notes: None,
        }
    }

    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            word: self.word.trim().to_string(),
            notes: trimmed_opt(self.notes),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        check_text(&mut errors, "word", &self.word, KEYWORD_MAX_LEN, true);
        errors.into_result()
    }
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

impl NewUser {
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_ascii_lowercase(),
            password: self.password,
            is_admin: self.is_admin,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        let username_len = self.username.chars().count();
        if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&username_len) {
            errors.push(
                "username",
                format!("must be between {USERNAME_MIN_LEN} and {USERNAME_MAX_LEN} characters"),
            );
        } else if !self
            .username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            errors.push("username", "may only contain letters, digits, '_', '-', '.'");
        }
        let email_ok = match self.email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            }
            None => false,
        };
        if !email_ok {
            errors.push("email", "must be a valid email address");
        } else if self.email.chars().count() > EMAIL_MAX_LEN {
            errors.push("email", format!("must be at most {EMAIL_MAX_LEN} characters"));
        }
        if self.password.chars().count() < PASSWORD_MIN_LEN {
            errors.push(
                "password",
                format!("must be at least {PASSWORD_MIN_LEN} characters"),
            );
        }
        errors.into_result()
    }
}
