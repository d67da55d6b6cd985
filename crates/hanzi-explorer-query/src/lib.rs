// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Catalog query service and graph builder. Everything here is a pure
//! function of a [`CatalogSnapshot`](hanzi_explorer_model::CatalogSnapshot).

mod catalog;
mod filters;
mod graph;
mod normalize;
mod query_error;

pub use catalog::CatalogQuery;
pub use filters::{CharacterFilter, SearchRequest};
pub use normalize::{normalize_glyph, normalize_text};
pub use query_error::{QueryError, QueryErrorCode};

pub const CRATE_NAME: &str = "hanzi-explorer-query";

/// Number of entries in the "recently added" panel.
pub const RECENT_LIMIT: usize = 5;
