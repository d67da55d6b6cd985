// SPDX-License-Identifier: Apache-2.0

use super::response::ApiFailure;
use crate::session::{token_from_headers, verify_token};
use crate::AppState;
use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use hanzi_explorer_api::ApiError;
use hanzi_explorer_core::unix_millis;
use hanzi_explorer_model::User;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

pub(crate) fn now_s() -> u64 {
    u64::try_from(unix_millis() / 1_000).unwrap_or_default()
}

fn body_rejection(status: StatusCode, reason: &str, limit: usize) -> ApiFailure {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiFailure(ApiError::payload_too_large(limit))
    } else {
        ApiFailure(ApiError::invalid_body(reason))
    }
}

/// `Json<T>` with rejections rendered as API errors.
pub(crate) struct JsonBody<T>(pub(crate) T);

#[async_trait]
impl<T> FromRequest<AppState> for JsonBody<T>
where
    T: DeserializeOwned,
{
    type Rejection = ApiFailure;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(body_rejection(
                rejection.status(),
                &rejection.body_text(),
                state.config.max_body_bytes,
            )),
        }
    }
}

/// Raw request body, used where the payload is parsed by a domain decoder.
pub(crate) struct RawBody(pub(crate) Bytes);

#[async_trait]
impl FromRequest<AppState> for RawBody {
    type Rejection = ApiFailure;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        match Bytes::from_request(req, state).await {
            Ok(bytes) => Ok(Self(bytes)),
            Err(rejection) => Err(body_rejection(
                rejection.status(),
                &rejection.body_text(),
                state.config.max_body_bytes,
            )),
        }
    }
}

pub(crate) struct QueryMap(pub(crate) BTreeMap<String, String>);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for QueryMap {
    type Rejection = ApiFailure;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<BTreeMap<String, String>>::from_request_parts(parts, state)
            .await
            .map(|Query(map)| Self(map))
            .map_err(|_| {
                let raw = parts.uri.query().unwrap_or_default();
                ApiFailure(ApiError::invalid_param("query", raw))
            })
    }
}

/// Any signed-in user whose session verifies and whose account still exists.
pub(crate) struct SessionUser(pub(crate) User);

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiFailure;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let authorization = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        let cookie = parts.headers.get(COOKIE).and_then(|v| v.to_str().ok());
        let token = token_from_headers(authorization, cookie)
            .ok_or_else(|| ApiFailure(ApiError::unauthorized()))?;
        let claims = verify_token(&state.config.secret_key, token, now_s()).map_err(|err| {
            tracing::debug!(reason = err.as_str(), "session rejected");
            ApiFailure(ApiError::unauthorized())
        })?;
        let user = state
            .with_store(move |store| Ok(store.get_user(claims.user_id)?))
            .await?;
        user.map(Self).ok_or_else(|| {
            tracing::debug!(user_id = claims.user_id, "session for unknown user");
            ApiFailure(ApiError::unauthorized())
        })
    }
}

pub(crate) struct AdminUser(pub(crate) User);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiFailure;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionUser(user) = SessionUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            tracing::info!(user_id = user.id, "admin route refused");
            return Err(ApiFailure(ApiError::forbidden()));
        }
        Ok(Self(user))
    }
}
