use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# engagemap configuration

[alignment]
# Class width of the grouped-data interpolated median
median_interval_width = 1.0

[cascade]
# Damping of alpha centrality
alpha_parameter = 0.9
local_weight = 0.4
global_weight = 0.3
topology_weight = 0.3
walktrap_steps = 4
# Layer given to nodes whose edges carry none
default_layer = 4

[cascade.gamma]
layer1 = 0.9
layer2 = 0.5
layer3 = 0.45
other = 0.1
"#;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    write_default_config(&config_path, force)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);
    Ok(())
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if io::file_exists(path) && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }
    io::write_file(path, DEFAULT_CONFIG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_and_validate_config, AlignmentConfig, CascadeConfig};

    #[test]
    fn test_default_config_matches_built_in_defaults() {
        let config = parse_and_validate_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.cascade(), CascadeConfig::default());
        assert_eq!(config.alignment(), AlignmentConfig::default());
    }

    #[test]
    fn test_existing_file_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        write_default_config(&path, false).unwrap();
        assert!(write_default_config(&path, false).is_err());
        assert!(write_default_config(&path, true).is_ok());
    }
}
