// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

#[test]
fn router_paths_match_openapi_paths() {
    let routing_src = std::fs::read_to_string(
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("src/routing.rs"),
    )
    .expect("read routing source");

    let param_re = regex::Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").expect("param regex");
    let route_re = regex::Regex::new(r#"\.route\(\s*"([^"]+)""#).expect("route regex");
    let routes: BTreeSet<String> = route_re
        .captures_iter(&routing_src)
        .map(|cap| param_re.replace_all(&cap[1], "{$1}").to_string())
        .collect();

    let spec = hanzi_explorer_api::openapi_spec();
    let documented: BTreeSet<String> = spec["paths"]
        .as_object()
        .expect("paths object")
        .keys()
        .cloned()
        .collect();

    let undocumented: Vec<_> = routes.difference(&documented).collect();
    let unrouted: Vec<_> = documented.difference(&routes).collect();
    assert!(
        undocumented.is_empty() && unrouted.is_empty(),
        "route drift: undocumented={undocumented:?} unrouted={unrouted:?}"
    );
}
