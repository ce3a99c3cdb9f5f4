// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::NodeId;

/// Lifecycle state of a concept node; drives its default color.
///
/// Fixtures carry the state as a free-form string. Unrecognized values are kept verbatim in
/// `Unknown` so they can still be rendered with the fallback color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeState {
    Active,
    Latent,
    Saturated,
    Unknown(String),
}

impl NodeState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Latent => "latent",
            Self::Saturated => "saturated",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for NodeState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "active" => Self::Active,
            "latent" => Self::Latent,
            "saturated" => Self::Saturated,
            _ => Self::Unknown(value),
        }
    }
}

impl From<NodeState> for String {
    fn from(value: NodeState) -> Self {
        match value {
            NodeState::Unknown(raw) => raw,
            other => other.as_str().to_owned(),
        }
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramNode {
    id: NodeId,
    label: String,
    axis: String,
    x: f64,
    y: f64,
    state: NodeState,
    #[serde(default)]
    description: String,
}

impl DiagramNode {
    pub fn new(
        id: NodeId,
        label: impl Into<String>,
        axis: impl Into<String>,
        position: (f64, f64),
        state: NodeState,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            axis: axis.into(),
            x: position.0,
            y: position.1,
            state,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn axis(&self) -> &str {
        &self.axis
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn state(&self) -> &NodeState {
        &self.state
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Undirected connection between two nodes. `weight` only affects stroke thickness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramEdge {
    source: NodeId,
    target: NodeId,
    weight: f64,
}

impl DiagramEdge {
    pub fn new(source: NodeId, target: NodeId, weight: f64) -> Self {
        Self { source, target, weight }
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// `true` when `node_id` is either endpoint.
    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.source == node_id || &self.target == node_id
    }

    /// Order-insensitive endpoint comparison.
    pub fn connects(&self, a: &NodeId, b: &NodeId) -> bool {
        (&self.source == a && &self.target == b) || (&self.source == b && &self.target == a)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    #[error("duplicate node id: {node_id}")]
    DuplicateNode { node_id: NodeId },
    #[error("edge {index} references unknown node: {node_id}")]
    DanglingEdge { index: usize, node_id: NodeId },
    #[error("edge {index} has invalid weight {weight} (must be finite and > 0)")]
    InvalidWeight { index: usize, weight: f64 },
}

/// Counters shown in the map header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateStats {
    pub active: usize,
    pub latent: usize,
    pub saturated: usize,
    pub other: usize,
    pub total: usize,
}

/// The validated, immutable node/edge set the controller and renderers run against.
///
/// Node order is the fixture order and is also the paint order of the generated diagram.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "MapFile")]
pub struct ConceptMap {
    nodes: Vec<DiagramNode>,
    index: BTreeMap<NodeId, usize>,
    edges: Vec<DiagramEdge>,
}

/// Raw fixture shape before integrity checks.
#[derive(Deserialize)]
pub(crate) struct MapFile {
    pub(crate) nodes: Vec<DiagramNode>,
    #[serde(default)]
    pub(crate) edges: Vec<DiagramEdge>,
}

impl TryFrom<MapFile> for ConceptMap {
    type Error = MapError;

    fn try_from(file: MapFile) -> Result<Self, Self::Error> {
        Self::new(file.nodes, file.edges)
    }
}

impl ConceptMap {
    pub fn new(nodes: Vec<DiagramNode>, edges: Vec<DiagramEdge>) -> Result<Self, MapError> {
        let mut index = BTreeMap::new();
        for (idx, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), idx).is_some() {
                return Err(MapError::DuplicateNode {
                    node_id: node.id.clone(),
                });
            }
        }

        for (idx, edge) in edges.iter().enumerate() {
            for endpoint in [&edge.source, &edge.target] {
                if !index.contains_key(endpoint) {
                    return Err(MapError::DanglingEdge {
                        index: idx,
                        node_id: endpoint.clone(),
                    });
                }
            }
            if !edge.weight.is_finite() || edge.weight <= 0.0 {
                return Err(MapError::InvalidWeight {
                    index: idx,
                    weight: edge.weight,
                });
            }
        }

        Ok(Self { nodes, index, edges })
    }

    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DiagramEdge] {
        &self.edges
    }

    pub fn node(&self, node_id: &str) -> Option<&DiagramNode> {
        self.index.get(node_id).map(|&idx| &self.nodes[idx])
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.index.contains_key(node_id)
    }

    /// Finds the edge between `a` and `b` regardless of direction.
    pub fn edge_between(&self, a: &NodeId, b: &NodeId) -> Option<&DiagramEdge> {
        self.edges.iter().find(|edge| edge.connects(a, b))
    }

    pub fn edges_touching<'a>(
        &'a self,
        node_id: &'a NodeId,
    ) -> impl Iterator<Item = &'a DiagramEdge> + 'a {
        self.edges.iter().filter(move |edge| edge.touches(node_id))
    }

    pub fn state_stats(&self) -> StateStats {
        let mut stats = StateStats {
            total: self.nodes.len(),
            ..StateStats::default()
        };
        for node in &self.nodes {
            match node.state {
                NodeState::Active => stats.active += 1,
                NodeState::Latent => stats.latent += 1,
                NodeState::Saturated => stats.saturated += 1,
                NodeState::Unknown(_) => stats.other += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ConceptMap, DiagramEdge, DiagramNode, MapError, NodeState};
    use crate::model::NodeId;

    fn nid(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    fn node(id: &str, state: NodeState) -> DiagramNode {
        DiagramNode::new(nid(id), id.to_uppercase(), "axis", (0.0, 0.0), state)
    }

    #[rstest]
    #[case("active", NodeState::Active)]
    #[case("latent", NodeState::Latent)]
    #[case("saturated", NodeState::Saturated)]
    #[case("dormant", NodeState::Unknown("dormant".to_owned()))]
    fn node_state_parses_free_form_strings(#[case] raw: &str, #[case] expected: NodeState) {
        let parsed: NodeState = serde_json::from_value(serde_json::json!(raw)).expect("state");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.as_str(), raw);
    }

    #[test]
    fn map_rejects_duplicate_node_ids() {
        let result = ConceptMap::new(
            vec![node("a", NodeState::Active), node("a", NodeState::Latent)],
            Vec::new(),
        );
        assert_eq!(result, Err(MapError::DuplicateNode { node_id: nid("a") }));
    }

    #[test]
    fn map_rejects_edges_with_unknown_endpoints() {
        let result = ConceptMap::new(
            vec![node("a", NodeState::Active)],
            vec![DiagramEdge::new(nid("a"), nid("ghost"), 1.0)],
        );
        assert_eq!(
            result,
            Err(MapError::DanglingEdge {
                index: 0,
                node_id: nid("ghost"),
            })
        );
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    fn map_rejects_non_positive_weights(#[case] weight: f64) {
        let result = ConceptMap::new(
            vec![node("a", NodeState::Active), node("b", NodeState::Active)],
            vec![DiagramEdge::new(nid("a"), nid("b"), weight)],
        );
        assert!(matches!(result, Err(MapError::InvalidWeight { index: 0, .. })));
    }

    #[test]
    fn map_deserializes_and_counts_states() {
        let map: ConceptMap = serde_json::from_str(
            r#"{
  "nodes": [
    {"id": "a", "label": "A", "axis": "x", "x": 1, "y": 2, "state": "active"},
    {"id": "b", "label": "B", "axis": "x", "x": 3, "y": 4, "state": "latent"},
    {"id": "c", "label": "C", "axis": "y", "x": 5, "y": 6, "state": "saturated"},
    {"id": "d", "label": "D", "axis": "y", "x": 7, "y": 8, "state": "mystery"}
  ],
  "edges": [{"source": "a", "target": "b", "weight": 1.5}]
}"#,
        )
        .expect("map");

        let stats = map.state_stats();
        assert_eq!((stats.active, stats.latent, stats.saturated), (1, 1, 1));
        assert_eq!(stats.other, 1);
        assert_eq!(stats.total, 4);
        assert_eq!(map.node("b").map(DiagramNode::position), Some((3.0, 4.0)));
        assert!(map.edge_between(&nid("b"), &nid("a")).is_some());
    }

    #[test]
    fn map_deserialization_surfaces_integrity_errors() {
        let err = serde_json::from_str::<ConceptMap>(
            r#"{"nodes": [], "edges": [{"source": "a", "target": "b", "weight": 1}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown node"));
    }
}
