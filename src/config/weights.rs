//! Analyzer parameters: cascade role weights, gamma table, median width
//!
//! Defaults reproduce the published scoring scheme; every section can be
//! overridden from `.engagemap.toml`.

use serde::{Deserialize, Serialize};

/// Parameters of the cascade composite role scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeConfig {
    /// Damping factor for alpha centrality
    #[serde(default = "default_alpha_parameter")]
    pub alpha_parameter: f64,

    /// Weight of the local metric in each role (alpha, 0.0-1.0)
    #[serde(default = "default_local_weight")]
    pub local_weight: f64,

    /// Weight of the global metric in each role (beta, 0.0-1.0)
    #[serde(default = "default_global_weight")]
    pub global_weight: f64,

    /// Multiplier applied to the averaged topology measures (lambda, 0.0-1.0)
    #[serde(default = "default_topology_weight")]
    pub topology_weight: f64,

    /// Random walk length used by community detection
    #[serde(default = "default_walktrap_steps")]
    pub walktrap_steps: usize,

    /// Layer assigned to nodes whose layer cannot be resolved
    #[serde(default = "default_layer")]
    pub default_layer: u32,

    #[serde(default)]
    pub gamma: GammaTable,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            alpha_parameter: default_alpha_parameter(),
            local_weight: default_local_weight(),
            global_weight: default_global_weight(),
            topology_weight: default_topology_weight(),
            walktrap_steps: default_walktrap_steps(),
            default_layer: default_layer(),
            gamma: GammaTable::default(),
        }
    }
}

impl CascadeConfig {
    pub fn with_alpha_parameter(mut self, alpha_parameter: f64) -> Self {
        self.alpha_parameter = alpha_parameter;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.alpha_parameter.is_finite() || self.alpha_parameter <= 0.0 {
            return Err(format!(
                "alpha_parameter must be a positive number, got {}",
                self.alpha_parameter
            ));
        }
        validate_unit("local_weight", self.local_weight)?;
        validate_unit("global_weight", self.global_weight)?;
        validate_unit("topology_weight", self.topology_weight)?;
        if self.walktrap_steps == 0 {
            return Err("walktrap_steps must be at least 1".to_string());
        }
        if self.default_layer == 0 {
            return Err("default_layer must be at least 1".to_string());
        }
        self.gamma.validate()
    }
}

/// Layer discount applied to every node's local and global metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GammaTable {
    #[serde(default = "default_gamma_layer1")]
    pub layer1: f64,
    #[serde(default = "default_gamma_layer2")]
    pub layer2: f64,
    #[serde(default = "default_gamma_layer3")]
    pub layer3: f64,
    /// Every layer past the third
    #[serde(default = "default_gamma_other")]
    pub other: f64,
}

impl Default for GammaTable {
    fn default() -> Self {
        Self {
            layer1: default_gamma_layer1(),
            layer2: default_gamma_layer2(),
            layer3: default_gamma_layer3(),
            other: default_gamma_other(),
        }
    }
}

impl GammaTable {
    pub fn gamma(&self, layer: u32) -> f64 {
        match layer {
            1 => self.layer1,
            2 => self.layer2,
            3 => self.layer3,
            _ => self.other,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_unit("gamma.layer1", self.layer1)?;
        validate_unit("gamma.layer2", self.layer2)?;
        validate_unit("gamma.layer3", self.layer3)?;
        validate_unit("gamma.other", self.other)
    }
}

/// Alignment analyzer parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentConfig {
    /// Class width used when interpolating tied medians
    #[serde(default = "default_median_interval_width")]
    pub median_interval_width: f64,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            median_interval_width: default_median_interval_width(),
        }
    }
}

impl AlignmentConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.median_interval_width.is_finite() && self.median_interval_width > 0.0 {
            Ok(())
        } else {
            Err(format!(
                "median_interval_width must be a positive number, got {}",
                self.median_interval_width
            ))
        }
    }
}

fn validate_unit(name: &str, value: f64) -> Result<(), String> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(format!("{} must be between 0.0 and 1.0, got {}", name, value))
    }
}

pub fn default_alpha_parameter() -> f64 {
    0.9
}
pub fn default_local_weight() -> f64 {
    0.4
}
pub fn default_global_weight() -> f64 {
    0.3
}
pub fn default_topology_weight() -> f64 {
    0.3
}
pub fn default_walktrap_steps() -> usize {
    4
}
pub fn default_layer() -> u32 {
    4
}
pub fn default_gamma_layer1() -> f64 {
    0.9
}
pub fn default_gamma_layer2() -> f64 {
    0.5
}
pub fn default_gamma_layer3() -> f64 {
    0.45
}
pub fn default_gamma_other() -> f64 {
    0.1
}
pub fn default_median_interval_width() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamma_table_lookup() {
        let gamma = GammaTable::default();
        assert_eq!(gamma.gamma(1), 0.9);
        assert_eq!(gamma.gamma(2), 0.5);
        assert_eq!(gamma.gamma(3), 0.45);
        assert_eq!(gamma.gamma(4), 0.1);
        assert_eq!(gamma.gamma(12), 0.1);
    }

    #[test]
    fn test_default_cascade_config_is_valid() {
        assert!(CascadeConfig::default().validate().is_ok());
        assert!(AlignmentConfig::default().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_weight_is_rejected() {
        let config = CascadeConfig {
            local_weight: 1.4,
            ..CascadeConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("local_weight"));
    }

    #[test]
    fn test_non_positive_alpha_is_rejected() {
        let config = CascadeConfig::default().with_alpha_parameter(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_section_keeps_defaults() {
        let config: CascadeConfig = toml::from_str("local_weight = 0.5").unwrap();
        assert_eq!(config.local_weight, 0.5);
        assert_eq!(config.global_weight, 0.3);
        assert_eq!(config.gamma, GammaTable::default());
    }
}
