// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! SQLite-backed entity store and mutation service for the character catalog.

mod entity_store;
mod error;
mod mutations;
mod row_decode;
mod schema;
mod tables;

pub use entity_store::EntityStore;
pub use error::{StoreError, StoreErrorCode};
pub use mutations::{MutationError, Mutations};
pub use schema::SCHEMA_VERSION;
pub use tables::CatalogTx;

pub const CRATE_NAME: &str = "hanzi-explorer-store";
