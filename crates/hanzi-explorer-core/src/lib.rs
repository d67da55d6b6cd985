// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod canonical;
mod errors;
mod paths;
pub mod password;
mod time;

pub use errors::{ExitCode, MachineError};
pub use paths::{resolve_config_path, resolve_data_dir, resolve_database_path};
pub use time::unix_millis;

pub const CRATE_NAME: &str = "hanzi-explorer-core";

pub const ENV_HANZI_LOG_LEVEL: &str = "HANZI_LOG_LEVEL";
pub const ENV_HANZI_DATA_DIR: &str = "HANZI_DATA_DIR";
pub const ENV_HANZI_DATABASE_PATH: &str = "HANZI_DATABASE_PATH";

pub const DEFAULT_DATABASE_FILE: &str = "hanzi.db";

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    canonical::hash_hex(bytes)
}
