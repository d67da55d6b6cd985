// SPDX-License-Identifier: Apache-2.0

use crate::http::{admin, auth, public};
use crate::middleware::{audit_middleware, request_tracing_middleware};
use crate::AppState;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;
    Router::new()
        .route("/healthz", get(public::healthz))
        .route("/api/version", get(public::version))
        .route("/api/openapi.json", get(public::openapi))
        .route("/api/characters", get(public::list_characters))
        .route("/api/metadata", get(public::metadata))
        .route("/api/character/:glyph", get(public::character_by_glyph))
        .route("/api/search", get(public::search))
        .route("/api/graph-data", get(public::graph_data))
        .route("/api/primitives", get(public::list_primitives))
        .route("/api/primitives/:id", get(public::primitive_detail))
        .route("/api/stats", get(public::stats))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/admin/dashboard", get(admin::dashboard))
        .route(
            "/admin/characters",
            get(admin::list_characters).post(admin::create_character),
        )
        .route(
            "/admin/characters/:id",
            get(admin::get_character)
                .put(admin::update_character)
                .delete(admin::delete_character),
        )
        .route(
            "/admin/primitives",
            get(admin::list_primitives).post(admin::create_primitive),
        )
        .route(
            "/admin/primitives/:id",
            get(admin::get_primitive)
                .put(admin::update_primitive)
                .delete(admin::delete_primitive),
        )
        .route(
            "/admin/keywords",
            get(admin::list_keywords).post(admin::create_keyword),
        )
        .route(
            "/admin/keywords/:id",
            axum::routing::delete(admin::delete_keyword),
        )
        .route("/admin/import", post(admin::import))
        .route("/admin/export", get(admin::export))
        .fallback(public::route_not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(from_fn_with_state(state.clone(), audit_middleware))
        .layer(from_fn_with_state(state.clone(), request_tracing_middleware))
        .with_state(state)
}
