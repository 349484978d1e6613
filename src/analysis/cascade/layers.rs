//! Degree-of-separation layers: per-node resolution and per-layer summary

use super::CascadeNode;
use crate::core::NetworkEdge;
use crate::metrics::mean;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Aggregate of every node sharing a layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSummary {
    pub layer: u32,
    pub label: String,
    pub count: usize,
    pub mean_gamma: f64,
    pub mean_knitting: f64,
    pub mean_bridging: f64,
    pub mean_channeling: f64,
    pub mean_reaching: f64,
    /// Mean composite score of the layer's nodes
    pub layer_score: f64,
}

/// Minimum layer over every edge touching each node.
///
/// Edges without a layer do not contribute; nodes left unresolved are absent
/// from the map and take the configured default.
pub fn resolve_node_layers(edges: &[NetworkEdge]) -> HashMap<&str, u32> {
    let mut layers: HashMap<&str, u32> = HashMap::new();

    for edge in edges {
        let Some(layer) = edge.layer else {
            continue;
        };
        for id in [edge.from.as_str(), edge.to.as_str()] {
            layers
                .entry(id)
                .and_modify(|current| *current = (*current).min(layer))
                .or_insert(layer);
        }
    }

    layers
}

/// "1st degree", "2nd degree", "3rd degree", then "Nth degree".
pub fn layer_label(layer: u32) -> String {
    let suffix = match layer {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{}{} degree", layer, suffix)
}

/// Group nodes by layer, ascending.
pub fn summarize_layers(nodes: &[CascadeNode]) -> Vec<LayerSummary> {
    let mut grouped: BTreeMap<u32, Vec<&CascadeNode>> = BTreeMap::new();
    for node in nodes {
        grouped.entry(node.layer).or_default().push(node);
    }

    grouped
        .into_iter()
        .map(|(layer, members)| {
            let column = |field: fn(&CascadeNode) -> f64| -> f64 {
                let values: Vec<f64> = members.iter().map(|node| field(node)).collect();
                mean(&values)
            };

            LayerSummary {
                layer,
                label: layer_label(layer),
                count: members.len(),
                mean_gamma: column(|n| n.gamma),
                mean_knitting: column(|n| n.knitting),
                mean_bridging: column(|n| n.bridging),
                mean_channeling: column(|n| n.channeling),
                mean_reaching: column(|n| n.reaching),
                layer_score: column(|n| n.composite_score),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_is_minimum_over_incident_edges() {
        let edges = vec![
            NetworkEdge::new("ego", "a", 1),
            NetworkEdge::new("a", "b", 2),
            NetworkEdge::new("b", "c", 3),
        ];

        let layers = resolve_node_layers(&edges);
        assert_eq!(layers["ego"], 1);
        assert_eq!(layers["a"], 1);
        assert_eq!(layers["b"], 2);
        assert_eq!(layers["c"], 3);
    }

    #[test]
    fn test_edges_without_layer_leave_nodes_unresolved() {
        let edges = vec![NetworkEdge {
            from: "x".to_string(),
            to: "y".to_string(),
            layer: None,
        }];

        assert!(resolve_node_layers(&edges).is_empty());
    }

    #[test]
    fn test_layer_labels() {
        assert_eq!(layer_label(1), "1st degree");
        assert_eq!(layer_label(2), "2nd degree");
        assert_eq!(layer_label(3), "3rd degree");
        assert_eq!(layer_label(4), "4th degree");
        assert_eq!(layer_label(11), "11th degree");
    }
}
