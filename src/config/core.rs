use serde::{Deserialize, Serialize};

use super::weights::{AlignmentConfig, CascadeConfig};

/// Root configuration structure for engagemap
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EngagemapConfig {
    /// Alignment analyzer parameters
    #[serde(default)]
    pub alignment: Option<AlignmentConfig>,

    /// Cascade analyzer parameters
    #[serde(default)]
    pub cascade: Option<CascadeConfig>,
}

impl EngagemapConfig {
    pub fn alignment(&self) -> AlignmentConfig {
        self.alignment.clone().unwrap_or_default()
    }

    pub fn cascade(&self) -> CascadeConfig {
        self.cascade.clone().unwrap_or_default()
    }
}
