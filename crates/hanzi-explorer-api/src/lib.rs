// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![recursion_limit = "256"]
//! Wire contract of the HTTP API, independent of the server runtime.

mod dto;
mod error_codes;
mod error_mapping;
mod errors;
pub mod openapi;
mod params;

pub use dto::{
    DeletedResponse, HealthResponse, LoginRequest, RegisterRequest, SessionResponse,
    StatsResponse, VersionResponse,
};
pub use error_codes::{ApiErrorCode, API_ERROR_CODES};
pub use error_mapping::{map_error, ApiErrorMapping, API_ERROR_SCHEMA_REF};
pub use errors::{ApiError, UNKNOWN_REQUEST_ID};
pub use openapi::{openapi_spec, API_VERSION};
pub use params::{
    parse_character_filter, parse_import_mode, parse_search_params, MAX_SEARCH_QUERY_CHARS,
};

pub const CRATE_NAME: &str = "hanzi-explorer-api";
