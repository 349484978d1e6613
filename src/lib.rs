// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod metrics;

// Re-export commonly used types
pub use crate::core::{DynamicsRecord, Frame, NetworkEdge, RatingRecord, Role};

pub use crate::analysis::{
    analyze_alignment, analyze_alignment_frame, analyze_alignment_with, analyze_cascade,
    analyze_cascade_frame, analyze_cascade_with, analyze_dynamics, analyze_dynamics_frame,
    AlignmentResult, CascadeNode, CascadeResult, CategorySummary, Degradation, DomainScore,
    DynamicsResult, DynamicsRow, LayerSummary, NodeMetrics, PlotRole, PlotRow,
};

pub use crate::analysis::graph_metrics::TopologyMetrics;

pub use crate::config::{AlignmentConfig, CascadeConfig, EngagemapConfig};

pub use crate::errors::{Error, Result, SchemaError};

pub use crate::metrics::{gini_balance, normalize, IccSummary};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter, Report};
