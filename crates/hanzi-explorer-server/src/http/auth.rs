// SPDX-License-Identifier: Apache-2.0

use super::extract::{now_s, JsonBody};
use super::response::{created, ApiFailure, HandlerResult};
use crate::session::{expired_session_cookie, issue_token, session_cookie};
use crate::AppState;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hanzi_explorer_api::{ApiError, LoginRequest, RegisterRequest, SessionResponse};
use hanzi_explorer_model::NewUser;
use hanzi_explorer_store::Mutations;

fn with_cookie(mut response: Response, cookie: &str) -> HandlerResult {
    let value = HeaderValue::from_str(cookie)
        .map_err(|e| ApiError::internal(format!("session cookie: {e}")))?;
    response.headers_mut().insert(SET_COOKIE, value);
    Ok(response)
}

/// Self-service sign-up; never grants admin.
pub(crate) async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> HandlerResult {
    let rounds = state.config.password_rounds;
    let new_user = NewUser {
        username: request.username,
        email: request.email,
        password: request.password,
        is_admin: false,
    };
    let user = state
        .with_store(move |store| {
            Ok(Mutations::new(store)
                .with_password_rounds(rounds)
                .create_user(new_user)?)
        })
        .await?;
    Ok(created(&user))
}

pub(crate) async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> HandlerResult {
    let user = state
        .with_store(move |store| {
            Ok(Mutations::new(store).authenticate(&request.username, &request.password)?)
        })
        .await?;
    let Some(user) = user else {
        tracing::info!("login refused");
        return Err(ApiFailure(ApiError::invalid_credentials()));
    };
    let ttl_s = state.config.session_ttl.as_secs();
    let expires_at_s = now_s().saturating_add(ttl_s);
    let token = issue_token(&state.config.secret_key, user.id, expires_at_s)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    tracing::info!(user_id = user.id, is_admin = user.is_admin, "session issued");
    let cookie = session_cookie(&token, ttl_s);
    let body = SessionResponse {
        token,
        token_type: "Bearer",
        expires_at_s,
        user,
    };
    with_cookie(Json(body).into_response(), &cookie)
}

/// Sessions are stateless; logging out clears the cookie.
pub(crate) async fn logout() -> HandlerResult {
    with_cookie(
        Json(serde_json::json!({"status": "logged_out"})).into_response(),
        &expired_session_cookie(),
    )
}
