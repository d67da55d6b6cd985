// SPDX-License-Identifier: Apache-2.0

//! Signed session tokens: `"{user_id}.{expires_at_s}.{hex hmac-sha256}"`.
//! The signature covers `"{user_id}.{expires_at_s}"`.

use hanzi_explorer_model::UserId;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "hanzi_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: UserId,
    pub expires_at_s: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    Malformed,
    BadSignature,
    Expired,
    InvalidKey,
}

impl SessionError {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::BadSignature => "bad_signature",
            Self::Expired => "expired",
            Self::InvalidKey => "invalid_key",
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session token {}", self.as_str())
    }
}

impl std::error::Error for SessionError {}

fn keyed_mac(secret: &str, payload: &str) -> Result<HmacSha256, SessionError> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| SessionError::InvalidKey)?;
    mac.update(payload.as_bytes());
    Ok(mac)
}

pub fn issue_token(
    secret: &str,
    user_id: UserId,
    expires_at_s: u64,
) -> Result<String, SessionError> {
    let payload = format!("{user_id}.{expires_at_s}");
    let signature = hex::encode(keyed_mac(secret, &payload)?.finalize().into_bytes());
    Ok(format!("{payload}.{signature}"))
}

/// Checks shape, signature and expiry. Existence of the user is the
/// caller's concern.
pub fn verify_token(secret: &str, token: &str, now_s: u64) -> Result<SessionClaims, SessionError> {
    let (payload, signature) = token.rsplit_once('.').ok_or(SessionError::Malformed)?;
    let (user_id, expires_at_s) = payload.split_once('.').ok_or(SessionError::Malformed)?;
    let user_id = user_id
        .parse::<UserId>()
        .map_err(|_| SessionError::Malformed)?;
    let expires_at_s = expires_at_s
        .parse::<u64>()
        .map_err(|_| SessionError::Malformed)?;
    let signature = hex::decode(signature).map_err(|_| SessionError::Malformed)?;
    keyed_mac(secret, payload)?
        .verify_slice(&signature)
        .map_err(|_| SessionError::BadSignature)?;
    if now_s >= expires_at_s {
        return Err(SessionError::Expired);
    }
    Ok(SessionClaims {
        user_id,
        expires_at_s,
    })
}

#[must_use]
pub fn session_cookie(token: &str, max_age_s: u64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_s}")
}

#[must_use]
pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Bearer credentials win over the cookie when both are present.
#[must_use]
pub fn token_from_headers<'h>(
    authorization: Option<&'h str>,
    cookie: Option<&'h str>,
) -> Option<&'h str> {
    let bearer = authorization
        .and_then(|v| v.trim().strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    bearer.or_else(|| {
        cookie?
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, value)| value.trim())
            .filter(|t| !t.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef-test";

    #[test]
    fn issued_token_verifies_until_expiry() {
        let token = issue_token(SECRET, 7, 1_000).expect("issue");
        assert!(token.starts_with("7.1000."));
        let claims = verify_token(SECRET, &token, 999).expect("valid");
        assert_eq!(claims.user_id, 7);
        assert_eq!(
            verify_token(SECRET, &token, 1_000),
            Err(SessionError::Expired)
        );
    }

    #[test]
    fn tampered_or_foreign_tokens_are_rejected() {
        let token = issue_token(SECRET, 7, 1_000).expect("issue");
        let forged = token.replacen("7.", "8.", 1);
        assert_eq!(
            verify_token(SECRET, &forged, 1),
            Err(SessionError::BadSignature)
        );
        assert_eq!(
            verify_token("another-secret-key-xyz", &token, 1),
            Err(SessionError::BadSignature)
        );
        assert_eq!(verify_token(SECRET, "garbage", 1), Err(SessionError::Malformed));
        assert_eq!(
            verify_token(SECRET, "7.1000.zz", 1),
            Err(SessionError::Malformed)
        );
    }

    #[test]
    fn bearer_header_takes_precedence_over_cookie() {
        assert_eq!(
            token_from_headers(Some("Bearer abc"), Some("hanzi_session=def")),
            Some("abc")
        );
        assert_eq!(
            token_from_headers(None, Some("theme=dark; hanzi_session=def")),
            Some("def")
        );
        assert_eq!(token_from_headers(Some("Basic xyz"), None), None);
        assert_eq!(token_from_headers(None, Some("hanzi_session=")), None);
    }

    #[test]
    fn cookies_are_http_only_and_lax() {
        let cookie = session_cookie("tok", 60);
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(expired_session_cookie().contains("Max-Age=0"));
    }
}
