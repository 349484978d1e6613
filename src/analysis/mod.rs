//! Engagement analyses
//!
//! - alignment: researcher vs partner ratings, interpolated medians and ICC
//! - dynamics: geometric-mean dimension and domain scores, Gini balance
//! - cascade: influence roles over a layered social network

pub mod alignment;
pub mod cascade;
pub mod dynamics;
pub mod graph_metrics;

pub use alignment::{
    analyze_alignment, analyze_alignment_frame, analyze_alignment_with, AlignmentResult,
    CategorySummary, PlotRole, PlotRow,
};
pub use cascade::{
    analyze_cascade, analyze_cascade_frame, analyze_cascade_with, CascadeNode, CascadeResult,
    Degradation, LayerSummary, NodeMetrics,
};
pub use dynamics::{
    analyze_dynamics, analyze_dynamics_frame, DomainScore, DynamicsResult, DynamicsRow,
};
