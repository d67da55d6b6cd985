// SPDX-License-Identifier: Apache-2.0

mod support;

use hanzi_explorer_query::CatalogQuery;
use support::{one_two_three, plink};

#[test]
fn graph_has_one_node_per_entity_and_one_edge_per_membership() {
    let snapshot = one_two_three();
    let graph = CatalogQuery::new(&snapshot).build_graph();
    assert_eq!(graph.nodes.len(), 5);
    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["c_1", "c_2", "c_3", "p_10", "p_20"]);
    let edges: Vec<&str> = graph.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(edges, vec!["p_10->c_2", "p_10->c_3", "p_20->c_3"]);
    assert_eq!(graph.skipped_edges, 0);
    assert_eq!(graph.edges[0].from, "p_10");
    assert_eq!(graph.edges[0].to, "c_2");
}

#[test]
fn node_titles_use_keyword_or_meaning() {
    let snapshot = one_two_three();
    let graph = CatalogQuery::new(&snapshot).build_graph();
    let value = serde_json::to_value(&graph).expect("json");
    assert_eq!(value["nodes"][1]["type"], "character");
    assert_eq!(value["nodes"][1]["title"], "two");
    assert_eq!(value["nodes"][3]["type"], "primitive");
    assert_eq!(value["nodes"][3]["label"], "一");
    assert_eq!(value["nodes"][3]["title"], "floor");
    assert_eq!(value["nodes"][4]["title"], "二");
}

#[test]
fn memberships_with_missing_endpoints_are_skipped_and_counted() {
    let mut snapshot = one_two_three();
    snapshot.primitive_links.push(plink(3, 999, 2));
    snapshot.primitive_links.push(plink(77, 10, 0));
    let graph = CatalogQuery::new(&snapshot).build_graph();
    assert_eq!(graph.edges.len(), 3);
    assert_eq!(graph.skipped_edges, 2);
}

#[test]
fn empty_catalog_yields_empty_graph() {
    let snapshot = hanzi_explorer_model::CatalogSnapshot::default();
    let graph = CatalogQuery::new(&snapshot).build_graph();
    assert!(graph.nodes.is_empty());
    assert!(graph.edges.is_empty());
}
