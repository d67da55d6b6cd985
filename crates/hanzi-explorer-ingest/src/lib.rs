// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Bulk import and export of the JSON catalog document.

mod error;
mod export;
mod import;
mod logging;
mod prepare;

pub use error::IngestError;
pub use export::{export_path, export_snapshot, export_store};
pub use import::{import_document, import_path, ImportMode, ImportReport};
pub use logging::{IngestEvent, IngestLog, IngestStage};
pub use prepare::parse_document;

pub const CRATE_NAME: &str = "hanzi-explorer-ingest";
