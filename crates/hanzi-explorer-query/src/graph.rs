// SPDX-License-Identifier: Apache-2.0

use crate::CatalogQuery;
use hanzi_explorer_model::{
    character_node_id, primitive_node_id, CharacterId, GraphData, GraphEdge, GraphNode, NodeKind,
    PrimitiveId,
};
use std::collections::{HashMap, HashSet};

impl CatalogQuery<'_> {
    /// Primitive -> character "is used by" graph, rebuilt from the snapshot
    /// on every call.
    #[must_use]
    pub fn build_graph(&self) -> GraphData {
        let snapshot = self.snapshot();
        let mut nodes = Vec::with_capacity(snapshot.characters.len() + snapshot.primitives.len());
        let mut order: HashMap<CharacterId, usize> = HashMap::new();
        for (ordinal, c) in snapshot.characters.iter().enumerate() {
            order.insert(c.id, ordinal);
            nodes.push(GraphNode {
                id: character_node_id(c.id),
                kind: NodeKind::Character,
                label: c.hanzi.clone(),
                title: self.primary_keyword(c.id).unwrap_or_default().to_string(),
                entity_id: c.id,
                heisig_index: Some(c.heisig_index),
            });
        }
        let primitive_ids: HashSet<PrimitiveId> =
            snapshot.primitives.iter().map(|p| p.id).collect();
        for p in &snapshot.primitives {
            nodes.push(GraphNode {
                id: primitive_node_id(p.id),
                kind: NodeKind::Primitive,
                label: p.symbol.clone(),
                title: p.meaning.clone().unwrap_or_else(|| p.name.clone()),
                entity_id: p.id,
                heisig_index: None,
            });
        }

        let mut skipped_edges = 0_usize;
        let mut ordered: Vec<(usize, i64, GraphEdge)> =
            Vec::with_capacity(snapshot.primitive_links.len());
        for link in &snapshot.primitive_links {
            let Some(ordinal) = order.get(&link.character_id) else {
                skipped_edges += 1;
                tracing::debug!(
                    character_id = link.character_id,
                    primitive_id = link.primitive_id,
                    "graph edge skipped: character missing"
                );
                continue;
            };
            if !primitive_ids.contains(&link.primitive_id) {
                skipped_edges += 1;
                tracing::debug!(
                    character_id = link.character_id,
                    primitive_id = link.primitive_id,
                    "graph edge skipped: primitive missing"
                );
                continue;
            }
            let from = primitive_node_id(link.primitive_id);
            let to = character_node_id(link.character_id);
            ordered.push((
                *ordinal,
                link.position,
                GraphEdge {
                    id: format!("{from}->{to}"),
                    from,
                    to,
                },
            ));
        }
        ordered.sort_by_key(|(ordinal, position, _)| (*ordinal, *position));

        GraphData {
            nodes,
            edges: ordered.into_iter().map(|(_, _, edge)| edge).collect(),
            skipped_edges,
        }
    }
}
