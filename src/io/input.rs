//! Reading analyzer input files into a [`Frame`]

use crate::core::Frame;
use crate::errors::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Array of objects
    Json,
    /// Sequence of mappings
    Yaml,
}

impl InputFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

pub fn load_frame(path: &Path) -> Result<Frame> {
    let format = InputFormat::from_path(path).ok_or_else(|| Error::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let contents = fs::read_to_string(path)
        .map_err(|e| Error::from(e).with_context(format!("reading {}", path.display())))?;

    log::debug!("Loading {:?} input from {}", format, path.display());
    parse_frame(&contents, format)
}

pub fn parse_frame(contents: &str, format: InputFormat) -> Result<Frame> {
    let value: Value = match format {
        InputFormat::Json => serde_json::from_str(contents)?,
        InputFormat::Yaml => serde_yaml::from_str(contents)?,
    };
    Ok(Frame::from_json(value)?)
}
