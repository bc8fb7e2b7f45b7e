//! Relationship Graph Model
//!
//! Node, edge and statistics structures produced by relationship
//! extraction, plus the builder that assigns their identifiers.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// =============================================================================
// Relationship
// =============================================================================

/// A raw `(from, to)` pair captured by a pattern, before id assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Source label (trimmed)
    pub from: String,
    /// Target label (trimmed)
    pub to: String,
}

impl Relationship {
    /// Build a relationship from two labels, trimming surrounding whitespace.
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.trim().to_string(),
            to: to.trim().to_string(),
        }
    }

    /// Both endpoints carry a non-empty label.
    pub fn is_complete(&self) -> bool {
        !self.from.is_empty() && !self.to.is_empty()
    }
}

// =============================================================================
// Node / Edge
// =============================================================================

/// A graph vertex, identified by its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// 1-based id in first-seen order
    pub id: usize,
    pub label: String,
}

/// A directed edge between two node labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// 1-based id in discovery order
    pub id: usize,
    pub from: String,
    pub to: String,
}

// =============================================================================
// Graph Result
// =============================================================================

/// Summary statistics for an extracted graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Directed density, `0.0` for fewer than two nodes
    pub density: f64,
}

impl GraphStats {
    /// Compute stats for the given counts.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_counts(node_count: usize, edge_count: usize) -> Self {
        let density = if node_count > 1 {
            edge_count as f64 / (node_count * (node_count - 1)) as f64
        } else {
            0.0
        };

        Self {
            node_count,
            edge_count,
            density,
        }
    }
}

/// The graph induced by a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphResult {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub stats: GraphStats,
}

impl GraphResult {
    /// A graph with no nodes and no edges.
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            stats: GraphStats::from_counts(0, 0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Look up a node by its label.
    pub fn node(&self, label: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.label == label)
    }
}

impl Default for GraphResult {
    fn default() -> Self {
        Self::empty()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Accumulates relationships in discovery order and resolves them into a
/// [`GraphResult`].
///
/// Nodes are deduplicated by exact label; edges are never deduplicated.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    labels: Vec<String>,
    seen: HashSet<String>,
    relationships: Vec<Relationship>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a relationship. Incomplete relationships are ignored and
    /// `false` is returned.
    pub fn push(&mut self, relationship: Relationship) -> bool {
        if !relationship.is_complete() {
            return false;
        }

        self.intern(&relationship.from);
        self.intern(&relationship.to);
        self.relationships.push(relationship);
        true
    }

    fn intern(&mut self, label: &str) {
        if self.seen.insert(label.to_string()) {
            self.labels.push(label.to_string());
        }
    }

    /// Assign ids and produce the final graph.
    pub fn build(self) -> GraphResult {
        let nodes: Vec<Node> = self
            .labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| Node { id: i + 1, label })
            .collect();

        let edges: Vec<Edge> = self
            .relationships
            .into_iter()
            .enumerate()
            .map(|(i, r)| Edge {
                id: i + 1,
                from: r.from,
                to: r.to,
            })
            .collect();

        let stats = GraphStats::from_counts(nodes.len(), edges.len());
        GraphResult {
            nodes,
            edges,
            stats,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_guards_small_graphs() {
        assert_eq!(GraphStats::from_counts(0, 0).density, 0.0);
        // single node with a self-loop must not divide by zero
        assert_eq!(GraphStats::from_counts(1, 3).density, 0.0);
        assert!((GraphStats::from_counts(2, 1).density - 0.5).abs() < f64::EPSILON);
        assert!((GraphStats::from_counts(4, 2).density - 2.0 / 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builder_first_seen_ids() {
        let mut builder = GraphBuilder::new();
        builder.push(Relationship::new("b", "a"));
        builder.push(Relationship::new("a", "c"));
        builder.push(Relationship::new("b", "a"));

        let graph = builder.build();
        let labels: Vec<_> = graph.nodes.iter().map(|n| (n.id, n.label.as_str())).collect();
        assert_eq!(labels, vec![(1, "b"), (2, "a"), (3, "c")]);

        // duplicates are kept as distinct edges
        assert_eq!(graph.edges.len(), 3);
        assert_eq!(graph.edges[2].id, 3);
        assert_eq!(graph.edges[0].from, graph.edges[2].from);
    }

    #[test]
    fn test_builder_rejects_incomplete() {
        let mut builder = GraphBuilder::new();
        assert!(!builder.push(Relationship::new("  ", "a")));
        assert!(!builder.push(Relationship::new("a", "")));
        assert!(builder.push(Relationship::new(" x ", " y ")));

        let graph = builder.build();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.node("x").map(|n| n.id), Some(1));
        assert_eq!(graph.node("y").map(|n| n.id), Some(2));
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        let mut builder = GraphBuilder::new();
        builder.push(Relationship::new("Node", "node"));

        let graph = builder.build();
        assert_eq!(graph.stats.node_count, 2);
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let json = serde_json::to_value(GraphResult::empty()).unwrap();
        assert_eq!(json["stats"]["nodeCount"], 0);
        assert_eq!(json["stats"]["edgeCount"], 0);
        assert_eq!(json["stats"]["density"], 0.0);
        assert!(json["nodes"].as_array().unwrap().is_empty());
    }
}
