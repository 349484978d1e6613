//! CLI command implementations for engagemap.
//!
//! - **alignment / dynamics / cascade**: load an input file, run the analysis
//!   and write the report ([`analyze`])
//! - **init**: write a default `.engagemap.toml`

pub mod analyze;
pub mod init;

pub use analyze::{handle_analyze, run_analysis, AnalysisKind, AnalyzeConfig};
pub use init::init_config;
