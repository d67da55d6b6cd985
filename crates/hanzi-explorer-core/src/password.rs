// SPDX-License-Identifier: Apache-2.0

//! Salted one-way password hashing (PBKDF2-HMAC-SHA256).
//!
//! Encoded form: `pbkdf2_sha256$<rounds>$<salt hex>$<digest hex>`.

use rand::RngCore;
use sha2::Sha256;
use std::fmt;

pub const PASSWORD_SCHEME: &str = "pbkdf2_sha256";
pub const DEFAULT_ROUNDS: u32 = 210_000;
const SALT_BYTES: usize = 16;
const DIGEST_BYTES: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHashError(pub String);

impl fmt::Display for PasswordHashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PasswordHashError {}

#[must_use]
pub fn hash_password(password: &str) -> String {
    hash_password_with_rounds(password, DEFAULT_ROUNDS)
}

#[must_use]
pub fn hash_password_with_rounds(password: &str, rounds: u32) -> String {
    let mut salt = [0_u8; SALT_BYTES];
    rand::thread_rng().fill_bytes(&mut salt);
    encode(rounds, &salt, &derive(password, &salt, rounds))
}

/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
pub fn verify_password(password: &str, encoded: &str) -> Result<bool, PasswordHashError> {
    let mut parts = encoded.split('$');
    let (Some(scheme), Some(rounds), Some(salt), Some(digest), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return Err(PasswordHashError("malformed password hash".to_string()));
    };
    if scheme != PASSWORD_SCHEME {
        return Err(PasswordHashError(format!(
            "unsupported password scheme `{scheme}`"
        )));
    }
    let rounds = rounds
        .parse::<u32>()
        .ok()
        .filter(|r| *r > 0)
        .ok_or_else(|| PasswordHashError("invalid password hash rounds".to_string()))?;
    let salt = hex::decode(salt)
        .map_err(|e| PasswordHashError(format!("invalid password salt: {e}")))?;
    let expected = hex::decode(digest)
        .map_err(|e| PasswordHashError(format!("invalid password digest: {e}")))?;
    let actual = derive(password, &salt, rounds);
    Ok(constant_time_eq(&actual, &expected))
}

fn derive(password: &str, salt: &[u8], rounds: u32) -> [u8; DIGEST_BYTES] {
    let mut out = [0_u8; DIGEST_BYTES];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, rounds, &mut out);
    out
}

fn encode(rounds: u32, salt: &[u8], digest: &[u8]) -> String {
    format!(
        "{PASSWORD_SCHEME}${rounds}${}${}",
        hex::encode(salt),
        hex::encode(digest)
    )
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0_u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_never_contains_plain_password() {
        let encoded = hash_password_with_rounds("correct horse", 1_000);
        assert!(!encoded.contains("correct horse"));
        assert!(encoded.starts_with("pbkdf2_sha256$1000$"));
    }

    #[test]
    fn verify_accepts_right_and_rejects_wrong_password() {
        let encoded = hash_password_with_rounds("s3cret-pass", 1_000);
        assert_eq!(verify_password("s3cret-pass", &encoded), Ok(true));
        assert_eq!(verify_password("s3cret-Pass", &encoded), Ok(false));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password_with_rounds("repeat-me", 1_000);
        let b = hash_password_with_rounds("repeat-me", 1_000);
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hashes_are_errors_not_mismatches() {
        assert!(verify_password("x", "plain-text").is_err());
        assert!(verify_password("x", "md5$1$00$00").is_err());
        assert!(verify_password("x", "pbkdf2_sha256$0$00$00").is_err());
        assert!(verify_password("x", "pbkdf2_sha256$10$zz$00").is_err());
    }
}
