use crate::analysis::{analyze_alignment_with, analyze_cascade_with, analyze_dynamics_frame};
use crate::config::{self, EngagemapConfig};
use crate::core::{Frame, NetworkEdge, RatingRecord};
use crate::errors::Error;
use crate::io::{self, OutputFormat, Report};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    Alignment,
    Dynamics,
    Cascade,
}

pub struct AnalyzeConfig {
    pub analysis: AnalysisKind,
    pub input: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    /// Cascade only
    pub alpha: Option<f64>,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let settings = resolve_settings(config.config.as_deref())?;

    let frame = io::load_frame(&config.input)
        .with_context(|| format!("Failed to load {}", config.input.display()))?;
    log::info!(
        "Loaded {} row(s) from {}",
        frame.len(),
        config.input.display()
    );

    let report = run_analysis(config.analysis, &frame, &settings, config.alpha)?;
    write_report(&report, config.format, config.output.as_deref())
}

fn resolve_settings(path: Option<&Path>) -> Result<EngagemapConfig> {
    match path {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("Failed to load configuration {}", path.display())),
        None => Ok(config::load_config()),
    }
}

/// Run one analysis over an already loaded frame.
pub fn run_analysis(
    analysis: AnalysisKind,
    frame: &Frame,
    settings: &EngagemapConfig,
    alpha: Option<f64>,
) -> crate::errors::Result<Report> {
    let _span = tracing::info_span!("analysis", kind = ?analysis, rows = frame.len()).entered();

    let report = match analysis {
        AnalysisKind::Alignment => {
            let records = RatingRecord::from_frame(frame)?;
            Report::Alignment(analyze_alignment_with(&records, &settings.alignment())?)
        }
        AnalysisKind::Dynamics => Report::Dynamics(analyze_dynamics_frame(frame)?),
        AnalysisKind::Cascade => {
            let mut cascade = settings.cascade();
            if let Some(alpha) = alpha {
                cascade = cascade.with_alpha_parameter(alpha);
                cascade.validate().map_err(Error::Configuration)?;
            }
            let edges = NetworkEdge::from_frame(frame)?;
            Report::Cascade(analyze_cascade_with(&edges, &cascade)?)
        }
    };

    Ok(report)
}

fn write_report(report: &Report, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let destination: Box<dyn Write> = match output {
        Some(path) => {
            // Escape codes do not belong in files
            colored::control::set_override(false);
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout()),
    };

    let mut writer = io::create_writer(format, destination);
    writer.write_report(report)?;

    if let Some(path) = output {
        log::info!("Report written to {}", path.display());
    }
    Ok(())
}
