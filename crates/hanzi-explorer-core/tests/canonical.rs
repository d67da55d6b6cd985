// SPDX-License-Identifier: Apache-2.0

use hanzi_explorer_core::{canonical, sha256_hex};
use serde_json::json;

#[test]
fn stable_json_bytes_ignore_key_order() {
    let a = json!({"volumes": [{"number": 1, "title": "Book 1"}], "count": 3});
    let b = json!({"count": 3, "volumes": [{"title": "Book 1", "number": 1}]});
    assert_eq!(
        canonical::stable_json_bytes(&a).expect("a"),
        canonical::stable_json_bytes(&b).expect("b")
    );
}

#[test]
fn entity_tag_is_quoted_sha256() {
    let tag = canonical::entity_tag(&json!({"hanzi": "一"})).expect("etag");
    assert!(tag.starts_with('"') && tag.ends_with('"'));
    assert_eq!(tag.len(), 64 + 2);
}

#[test]
fn sha256_hex_matches_known_vector() {
    assert_eq!(
        sha256_hex(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}
