//! Cascade analysis: how evenly social-network influence spreads across
//! degrees of separation
//!
//! Pipeline:
//! 1. resolve each node's layer (minimum over incident edges) and its gamma
//! 2. build the undirected network and its whole-network topology bonus
//! 3. compute local and global node metrics (in parallel, they are independent)
//! 4. combine them into knitting, bridging, channeling and reaching roles
//! 5. summarise per layer and score the balance of layer scores
//!
//! Metrics that cannot be computed for a topology degrade to their documented
//! fallback and are listed in [`CascadeResult::degradations`].

pub mod layers;
pub mod roles;

pub use layers::{layer_label, resolve_node_layers, summarize_layers, LayerSummary};
pub use roles::NodeMetrics;

use crate::analysis::graph_metrics::{Network, TopologyMetrics};
use crate::config::CascadeConfig;
use crate::core::{Frame, NetworkEdge};
use crate::errors::SchemaError;
use crate::metrics::gini_balance;
use serde::Serialize;

/// A metric that fell back to its default for this network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Degradation {
    pub metric: &'static str,
    pub reason: String,
}

impl Degradation {
    pub fn new(metric: &'static str, reason: impl Into<String>) -> Self {
        Self {
            metric,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CascadeNode {
    pub id: String,
    pub layer: u32,
    pub gamma: f64,
    pub knitting: f64,
    pub bridging: f64,
    pub channeling: f64,
    pub reaching: f64,
    /// Mean of the four role scores
    pub composite_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CascadeResult {
    /// Nodes in first-appearance order
    pub node_table: Vec<CascadeNode>,
    /// Layers in ascending order
    pub layer_summary: Vec<LayerSummary>,
    pub cascade_score: f64,
    pub topology_score: f64,
    pub topology: TopologyMetrics,
    pub metrics: NodeMetrics,
    pub degradations: Vec<Degradation>,
}

impl CascadeResult {
    pub fn node(&self, id: &str) -> Option<&CascadeNode> {
        self.node_table.iter().find(|node| node.id == id)
    }

    pub fn layer(&self, layer: u32) -> Option<&LayerSummary> {
        self.layer_summary.iter().find(|row| row.layer == layer)
    }
}

/// Analyze edges with the default weights and the given alpha damping.
pub fn analyze_cascade(
    edges: &[NetworkEdge],
    alpha_parameter: f64,
) -> Result<CascadeResult, SchemaError> {
    let config = CascadeConfig::default().with_alpha_parameter(alpha_parameter);
    analyze_cascade_with(edges, &config)
}

/// Convert frame rows and analyze them.
pub fn analyze_cascade_frame(
    frame: &Frame,
    config: &CascadeConfig,
) -> Result<CascadeResult, SchemaError> {
    analyze_cascade_with(&NetworkEdge::from_frame(frame)?, config)
}

/// Layers count degrees of separation, so 0 is never valid.
fn validate_layers(edges: &[NetworkEdge]) -> Result<(), SchemaError> {
    match edges.iter().position(|edge| edge.layer == Some(0)) {
        Some(row) => Err(SchemaError::out_of_range("layer", row, 0.0, "[1, u32::MAX]")),
        None => Ok(()),
    }
}

pub fn analyze_cascade_with(
    edges: &[NetworkEdge],
    config: &CascadeConfig,
) -> Result<CascadeResult, SchemaError> {
    validate_layers(edges)?;

    let network = Network::from_edges(edges);
    let _span = tracing::debug_span!(
        "cascade",
        nodes = network.node_count(),
        edges = network.edge_count()
    )
    .entered();

    let resolved = resolve_node_layers(edges);
    let ids = network.ids();
    let node_layers: Vec<u32> = ids
        .iter()
        .map(|id| {
            resolved.get(id).copied().unwrap_or_else(|| {
                log::debug!(
                    "Node {} has no layer, defaulting to {}",
                    id,
                    config.default_layer
                );
                config.default_layer
            })
        })
        .collect();
    let gamma: Vec<f64> = node_layers
        .iter()
        .map(|&layer| config.gamma.gamma(layer))
        .collect();

    let distances = network.distance_matrix();
    let topology = TopologyMetrics::compute(
        &distances,
        &network.components(),
        config.topology_weight,
    );

    let (local, global) = rayon::join(
        || roles::local_metrics(&network, config),
        || roles::global_metrics(&network, &distances, config),
    );

    let roles = roles::compose_roles(&gamma, &local, &global, topology.score, config);
    let (metrics, degradations) = roles::into_node_metrics(local, global);

    let node_table: Vec<CascadeNode> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let scores = [
                roles.knitting[i],
                roles.bridging[i],
                roles.channeling[i],
                roles.reaching[i],
            ];
            CascadeNode {
                id: id.to_string(),
                layer: node_layers[i],
                gamma: gamma[i],
                knitting: scores[0],
                bridging: scores[1],
                channeling: scores[2],
                reaching: scores[3],
                composite_score: scores.iter().sum::<f64>() / scores.len() as f64,
            }
        })
        .collect();

    let layer_summary = summarize_layers(&node_table);
    let layer_scores: Vec<f64> = layer_summary.iter().map(|row| row.layer_score).collect();

    log::debug!(
        "Cascade analysis: {} nodes across {} layers, {} degraded metric(s)",
        node_table.len(),
        layer_summary.len(),
        degradations.len()
    );

    Ok(CascadeResult {
        cascade_score: gini_balance(&layer_scores),
        topology_score: topology.score,
        node_table,
        layer_summary,
        topology,
        metrics,
        degradations,
    })
}
