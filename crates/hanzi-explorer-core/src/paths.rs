// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

const APP_DIR: &str = "hanzi-explorer";

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[must_use]
pub fn resolve_data_dir() -> PathBuf {
    if let Some(explicit) = non_empty_env(crate::ENV_HANZI_DATA_DIR) {
        return PathBuf::from(explicit);
    }
    if let Some(xdg_data_home) = non_empty_env("XDG_DATA_HOME") {
        return PathBuf::from(xdg_data_home).join(APP_DIR);
    }
    if let Some(home) = non_empty_env("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }
    PathBuf::from(".hanzi-explorer")
}

/// `HANZI_DATABASE_PATH` wins; otherwise `hanzi.db` under the data directory.
#[must_use]
pub fn resolve_database_path() -> PathBuf {
    non_empty_env(crate::ENV_HANZI_DATABASE_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|| resolve_data_dir().join(crate::DEFAULT_DATABASE_FILE))
}

#[must_use]
pub fn resolve_config_path() -> PathBuf {
    if let Some(xdg_config_home) = non_empty_env("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg_config_home)
            .join(APP_DIR)
            .join("config.env");
    }
    if let Some(home) = non_empty_env("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join("config.env");
    }
    PathBuf::from(".hanzi-explorer").join("config.env")
}
