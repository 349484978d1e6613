//! Graph metrics for social networks
//!
//! The network is held in a `petgraph` undirected graph; the measures below
//! work on node positions so their outputs line up with [`Network::ids`].

pub mod centrality;
pub mod clustering;
pub mod community;
pub mod network;
pub mod topology;

pub use centrality::{
    alpha_centrality, betweenness_centrality, eigenvector_centrality, harmonic_centrality,
    CentralityError,
};
pub use clustering::{local_clustering, structural_constraint};
pub use community::walktrap_membership;
pub use network::{DistanceMatrix, Network};
pub use topology::TopologyMetrics;
