use std::fs;
use std::path::{Path, PathBuf};

use super::core::EngagemapConfig;
use super::weights::{AlignmentConfig, CascadeConfig};
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".engagemap.toml";

/// Pure function to parse and validate config from TOML string
///
/// Sections that fail validation are replaced by their defaults with a
/// warning; only malformed TOML is an error.
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<EngagemapConfig, String> {
    let mut config = toml::from_str::<EngagemapConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if let Some(cascade) = &config.cascade {
        if let Err(e) = cascade.validate() {
            log::warn!("Invalid cascade configuration: {}. Using defaults.", e);
            config.cascade = Some(CascadeConfig::default());
        }
    }

    if let Some(alignment) = &config.alignment {
        if let Err(e) = alignment.validate() {
            log::warn!("Invalid alignment configuration: {}. Using defaults.", e);
            config.alignment = Some(AlignmentConfig::default());
        }
    }

    Ok(config)
}

/// Load an explicitly requested config file; every failure is reported.
pub fn load_config_from(path: &Path) -> Result<EngagemapConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::from(e).with_context(format!("reading {}", path.display())))?;
    parse_and_validate_config(&contents).map_err(Error::Configuration)
}

/// Pure function to try loading config from a specific path
fn try_load_config_from_path(config_path: &Path) -> Option<EngagemapConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search the current directory and its ancestors for a config file.
pub fn load_config() -> EngagemapConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return EngagemapConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            EngagemapConfig::default()
        })
}
