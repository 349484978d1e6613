//! Per-node metric vectors and the four composite influence roles
//!
//! Local metrics describe a node's immediate neighbourhood, global metrics its
//! position in the whole network. Every vector is min-max normalized across
//! nodes before it is weighted.

use super::Degradation;
use crate::analysis::graph_metrics::{
    alpha_centrality, betweenness_centrality, eigenvector_centrality, harmonic_centrality,
    local_clustering, structural_constraint, walktrap_membership, CentralityError, DistanceMatrix,
    Network,
};
use crate::config::CascadeConfig;
use crate::metrics::{normalize, zero_nan};
use serde::Serialize;

/// Normalized metric vectors, indexed by node position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeMetrics {
    pub local_community: Vec<f64>,
    pub local_cross_clique: Vec<f64>,
    pub local_clustering: Vec<f64>,
    pub local_betweenness: Vec<f64>,
    pub global_eigen: Vec<f64>,
    pub global_betweenness: Vec<f64>,
    pub global_harmonic: Vec<f64>,
    pub global_alpha: Vec<f64>,
}

pub(super) struct LocalMetrics {
    community: Vec<f64>,
    cross_clique: Vec<f64>,
    clustering: Vec<f64>,
    betweenness: Vec<f64>,
    degradations: Vec<Degradation>,
}

pub(super) struct GlobalMetrics {
    eigen: Vec<f64>,
    betweenness: Vec<f64>,
    harmonic: Vec<f64>,
    alpha: Vec<f64>,
    degradations: Vec<Degradation>,
}

/// Composite role scores, already normalized.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Roles {
    pub knitting: Vec<f64>,
    pub bridging: Vec<f64>,
    pub channeling: Vec<f64>,
    pub reaching: Vec<f64>,
}

fn undefined_entries(metric: &'static str, values: &[f64]) -> Option<Degradation> {
    let undefined = values.iter().filter(|v| v.is_nan()).count();
    (undefined > 0).then(|| {
        Degradation::new(
            metric,
            format!("undefined for {} node(s), scored 0", undefined),
        )
    })
}

pub(super) fn local_metrics(network: &Network, config: &CascadeConfig) -> LocalMetrics {
    let _span = tracing::debug_span!("local_metrics").entered();
    let adjacency = network.adjacency();
    let mut degradations = Vec::new();

    // Community ids are ordinal labels, not a cohesion measure
    let membership: Vec<f64> = walktrap_membership(&adjacency, config.walktrap_steps)
        .into_iter()
        .map(|id| id as f64)
        .collect();

    let openness: Vec<f64> = structural_constraint(&adjacency)
        .into_iter()
        .map(|c| 1.0 - c)
        .collect();
    degradations.extend(undefined_entries("local_cross_clique", &openness));

    let clustering = local_clustering(&adjacency);
    degradations.extend(undefined_entries("local_clustering", &clustering));

    LocalMetrics {
        community: normalize(&membership),
        cross_clique: zero_nan(normalize(&openness)),
        clustering: zero_nan(normalize(&clustering)),
        betweenness: normalize(&betweenness_centrality(network)),
        degradations,
    }
}

pub(super) fn global_metrics(
    network: &Network,
    distances: &DistanceMatrix,
    config: &CascadeConfig,
) -> GlobalMetrics {
    let _span = tracing::debug_span!("global_metrics").entered();
    let n = network.node_count();
    let mut degradations = Vec::new();

    let eigen = or_zeros(
        "global_eigen",
        eigenvector_centrality(network),
        n,
        &mut degradations,
    );
    let alpha = or_zeros(
        "global_alpha",
        alpha_centrality(network, config.alpha_parameter),
        n,
        &mut degradations,
    );

    GlobalMetrics {
        eigen,
        // Same measure as the local betweenness
        betweenness: normalize(&betweenness_centrality(network)),
        harmonic: normalize(&harmonic_centrality(distances)),
        alpha,
        degradations,
    }
}

fn or_zeros(
    metric: &'static str,
    result: Result<Vec<f64>, CentralityError>,
    n: usize,
    degradations: &mut Vec<Degradation>,
) -> Vec<f64> {
    match result {
        Ok(values) => normalize(&values),
        Err(e) => {
            log::warn!("{} could not be computed ({}); using zeros", metric, e);
            degradations.push(Degradation::new(metric, e.to_string()));
            vec![0.0; n]
        }
    }
}

/// weight the local and global metric by gamma and add the topology bonus
fn role(
    gamma: &[f64],
    local: &[f64],
    global: &[f64],
    topology_score: f64,
    config: &CascadeConfig,
) -> Vec<f64> {
    let raw: Vec<f64> = gamma
        .iter()
        .zip(local.iter().zip(global))
        .map(|(g, (l, gl))| {
            g * (config.local_weight * l + config.global_weight * gl) + topology_score
        })
        .collect();
    normalize(&raw)
}

pub(super) fn compose_roles(
    gamma: &[f64],
    local: &LocalMetrics,
    global: &GlobalMetrics,
    topology_score: f64,
    config: &CascadeConfig,
) -> Roles {
    Roles {
        knitting: role(gamma, &local.community, &global.eigen, topology_score, config),
        bridging: role(
            gamma,
            &local.cross_clique,
            &global.betweenness,
            topology_score,
            config,
        ),
        channeling: role(
            gamma,
            &local.betweenness,
            &global.alpha,
            topology_score,
            config,
        ),
        reaching: role(
            gamma,
            &local.clustering,
            &global.harmonic,
            topology_score,
            config,
        ),
    }
}

pub(super) fn into_node_metrics(
    local: LocalMetrics,
    global: GlobalMetrics,
) -> (NodeMetrics, Vec<Degradation>) {
    let mut degradations = local.degradations;
    degradations.extend(global.degradations);

    let metrics = NodeMetrics {
        local_community: local.community,
        local_cross_clique: local.cross_clique,
        local_clustering: local.clustering,
        local_betweenness: local.betweenness,
        global_eigen: global.eigen,
        global_betweenness: global.betweenness,
        global_harmonic: global.harmonic,
        global_alpha: global.alpha,
    };

    (metrics, degradations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NetworkEdge;

    fn star() -> Network {
        Network::from_edges(&[
            NetworkEdge::new("hub", "a", 1),
            NetworkEdge::new("hub", "b", 1),
            NetworkEdge::new("hub", "c", 1),
        ])
    }

    #[test]
    fn test_star_local_metrics() {
        let local = local_metrics(&star(), &CascadeConfig::default());

        // Hub is the only node with a defined clustering coefficient (0), so
        // every value collapses to zero
        assert_eq!(local.clustering, vec![0.0; 4]);
        // Hub has the lowest constraint, so the most cross-clique openness
        assert_eq!(local.cross_clique[0], 1.0);
        assert_eq!(local.betweenness[0], 1.0);
        assert_eq!(local.betweenness[1], 0.0);
        assert!(local
            .degradations
            .iter()
            .any(|d| d.metric == "local_clustering"));
    }

    #[test]
    fn test_alpha_failure_degrades_to_zeros() {
        let network = Network::from_edges(&[NetworkEdge::new("a", "b", 1)]);
        let config = CascadeConfig::default().with_alpha_parameter(1.0);
        let global = global_metrics(&network, &network.distance_matrix(), &config);

        assert_eq!(global.alpha, vec![0.0, 0.0]);
        assert_eq!(global.degradations.len(), 1);
        assert_eq!(global.degradations[0].metric, "global_alpha");
    }

    #[test]
    fn test_roles_are_normalized() {
        let network = star();
        let config = CascadeConfig::default();
        let local = local_metrics(&network, &config);
        let global = global_metrics(&network, &network.distance_matrix(), &config);
        let gamma = vec![0.9; 4];

        let roles = compose_roles(&gamma, &local, &global, 0.2, &config);
        for values in [&roles.knitting, &roles.bridging, &roles.channeling, &roles.reaching] {
            assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
        }
        assert_eq!(roles.bridging[0], 1.0);
    }
}
