// SPDX-License-Identifier: Apache-2.0

use hanzi_explorer_core::{resolve_data_dir, resolve_database_path};

// Environment mutation is process-wide, so every case lives in one test.
#[test]
fn data_dir_and_database_path_resolution_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::env::remove_var("HANZI_DATABASE_PATH");
    std::env::set_var("HANZI_DATA_DIR", dir.path());
    assert_eq!(resolve_data_dir(), dir.path());
    assert_eq!(resolve_database_path(), dir.path().join("hanzi.db"));

    std::env::set_var("HANZI_DATABASE_PATH", "/tmp/explicit.db");
    assert_eq!(
        resolve_database_path(),
        std::path::PathBuf::from("/tmp/explicit.db")
    );

    std::env::remove_var("HANZI_DATABASE_PATH");
    std::env::set_var("HANZI_DATA_DIR", "   ");
    std::env::set_var("XDG_DATA_HOME", dir.path());
    assert_eq!(resolve_data_dir(), dir.path().join("hanzi-explorer"));
    std::env::remove_var("HANZI_DATA_DIR");
    std::env::remove_var("XDG_DATA_HOME");
}
