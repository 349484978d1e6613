//! Undirected social network built from an edge list
//!
//! Nodes keep first-appearance order (row order, `from` before `to`), so node
//! `i` in every metric vector is `Network::ids()[i]`. Parallel edges collapse
//! and self-loops carry no adjacency.

use crate::core::NetworkEdge;
use petgraph::algo::dijkstra;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Hop distance between two nodes, `None` when unreachable
pub type DistanceMatrix = Vec<Vec<Option<usize>>>;

#[derive(Debug, Clone, Default)]
pub struct Network {
    graph: UnGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

impl Network {
    pub fn from_edges(edges: &[NetworkEdge]) -> Self {
        let mut network = Self::default();

        for edge in edges {
            let from = network.ensure_node(&edge.from);
            let to = network.ensure_node(&edge.to);
            if from != to {
                network.graph.update_edge(from, to, ());
            }
        }

        network
    }

    fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&node) = self.index.get(id) {
            return node;
        }
        let node = self.graph.add_node(id.to_string());
        self.index.insert(id.to_string(), node);
        node
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|node| self.graph[node].as_str())
            .collect()
    }

    /// Neighbor lists indexed by node position.
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        self.graph
            .node_indices()
            .map(|node| {
                let mut neighbors: Vec<usize> =
                    self.graph.neighbors(node).map(|n| n.index()).collect();
                neighbors.sort_unstable();
                neighbors
            })
            .collect()
    }

    /// Undirected edges as (smaller, larger) position pairs.
    pub fn edge_pairs(&self) -> Vec<(usize, usize)> {
        self.graph
            .edge_references()
            .map(|edge| {
                let (a, b) = (edge.source().index(), edge.target().index());
                (a.min(b), a.max(b))
            })
            .collect()
    }

    /// Unit-weight shortest path lengths between every pair of nodes.
    pub fn distance_matrix(&self) -> DistanceMatrix {
        let n = self.node_count();
        self.graph
            .node_indices()
            .map(|source| {
                let reached = dijkstra(&self.graph, source, None, |_| 1usize);
                let mut row = vec![None; n];
                for (node, distance) in reached {
                    row[node.index()] = Some(distance);
                }
                row
            })
            .collect()
    }

    /// Connected component label per node position.
    pub fn components(&self) -> Vec<usize> {
        let mut sets = UnionFind::new(self.node_count());
        for (a, b) in self.edge_pairs() {
            sets.union(a, b);
        }
        sets.into_labeling()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &[(&str, &str)]) -> Vec<NetworkEdge> {
        pairs
            .iter()
            .map(|(a, b)| NetworkEdge::new(*a, *b, 1))
            .collect()
    }

    #[test]
    fn test_nodes_keep_first_appearance_order() {
        let network = Network::from_edges(&edges(&[("b", "a"), ("c", "b")]));
        assert_eq!(network.ids(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_parallel_edges_and_self_loops_collapse() {
        let network = Network::from_edges(&edges(&[("a", "b"), ("b", "a"), ("a", "a")]));
        assert_eq!(network.node_count(), 2);
        assert_eq!(network.edge_count(), 1);
        assert_eq!(network.adjacency(), vec![vec![1], vec![0]]);
    }

    #[test]
    fn test_distance_matrix_on_path() {
        let network = Network::from_edges(&edges(&[("a", "b"), ("b", "c"), ("x", "y")]));
        let distances = network.distance_matrix();
        assert_eq!(distances[0][2], Some(2));
        assert_eq!(distances[0][0], Some(0));
        assert_eq!(distances[0][3], None);
    }

    #[test]
    fn test_components_split_disconnected_parts() {
        let network = Network::from_edges(&edges(&[("a", "b"), ("c", "d")]));
        let labels = network.components();
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
    }
}
