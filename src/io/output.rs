use crate::analysis::{AlignmentResult, CascadeResult, DynamicsResult, PlotRole};
use clap::ValueEnum;
use colored::*;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

/// Result of any one analysis, ready to be written.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "analysis", rename_all = "lowercase")]
pub enum Report {
    Alignment(AlignmentResult),
    Dynamics(DynamicsResult),
    Cascade(CascadeResult),
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()>;
}

fn score(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.2}")
    }
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), score)
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        match report {
            Report::Alignment(result) => self.write_alignment(result)?,
            Report::Dynamics(result) => self.write_dynamics(result)?,
            Report::Cascade(result) => self.write_cascade(result)?,
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_summary_row(&mut self, metric: &str, value: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "| {metric} | {value} |")?;
        Ok(())
    }

    fn write_summary_header(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        Ok(())
    }

    fn write_alignment(&mut self, result: &AlignmentResult) -> anyhow::Result<()> {
        writeln!(self.writer, "# Alignment Analysis")?;
        writeln!(self.writer)?;
        self.write_summary_header()?;
        self.write_summary_row("Categories", &result.table.len().to_string())?;
        self.write_summary_row("ICC", &optional(result.icc_value))?;
        self.write_summary_row("Alignment score", &optional(result.alignment_score))?;
        writeln!(self.writer)?;

        if result.table.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Categories")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Category | Researcher | Partner | Overall | Min | Max |"
        )?;
        writeln!(
            self.writer,
            "|----------|------------|---------|---------|-----|-----|"
        )?;
        for row in &result.table {
            let overall = result.overall(&row.category).and_then(|r| r.rating);
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} |",
                row.category,
                optional(row.researcher_median),
                optional(row.partner_median),
                optional(overall),
                optional(row.min),
                optional(row.max)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_dynamics(&mut self, result: &DynamicsResult) -> anyhow::Result<()> {
        writeln!(self.writer, "# Dynamics Analysis")?;
        writeln!(self.writer)?;
        self.write_summary_header()?;
        self.write_summary_row("Domains", &result.domain_table.len().to_string())?;
        self.write_summary_row("Dynamics score", &score(result.dynamics_score))?;
        writeln!(self.writer)?;

        writeln!(self.writer, "## Domains")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Domain | Score |")?;
        writeln!(self.writer, "|--------|-------|")?;
        for domain in &result.domain_table {
            writeln!(
                self.writer,
                "| {} | {} |",
                domain.domain,
                score(domain.domain_score)
            )?;
        }
        writeln!(self.writer)?;

        writeln!(self.writer, "## Dimensions")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Domain | Dimension | Salience | Weight | Value | Dimension score |"
        )?;
        writeln!(
            self.writer,
            "|--------|-----------|----------|--------|-------|-----------------|"
        )?;
        for row in &result.rows {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} |",
                row.domain,
                row.dimension,
                optional(row.salience),
                optional(row.weight),
                optional(row.dimension_value),
                score(row.dimension_score)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_cascade(&mut self, result: &CascadeResult) -> anyhow::Result<()> {
        writeln!(self.writer, "# Cascade Analysis")?;
        writeln!(self.writer)?;
        self.write_summary_header()?;
        self.write_summary_row("Nodes", &result.node_table.len().to_string())?;
        self.write_summary_row("Cascade score", &score(result.cascade_score))?;
        self.write_summary_row("Topology score", &score(result.topology_score))?;
        self.write_summary_row("Global efficiency", &score(result.topology.efficiency))?;
        self.write_summary_row("Connectedness", &score(result.topology.connectedness))?;
        self.write_summary_row("Hierarchy", &score(result.topology.hierarchy))?;
        self.write_summary_row("Least upper boundedness", &score(result.topology.lub))?;
        writeln!(self.writer)?;

        if !result.layer_summary.is_empty() {
            writeln!(self.writer, "## Layers")?;
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "| Layer | Nodes | Gamma | Knitting | Bridging | Channeling | Reaching | Score |"
            )?;
            writeln!(
                self.writer,
                "|-------|-------|-------|----------|----------|------------|----------|-------|"
            )?;
            for layer in &result.layer_summary {
                writeln!(
                    self.writer,
                    "| {} | {} | {} | {} | {} | {} | {} | {} |",
                    layer.label,
                    layer.count,
                    score(layer.mean_gamma),
                    score(layer.mean_knitting),
                    score(layer.mean_bridging),
                    score(layer.mean_channeling),
                    score(layer.mean_reaching),
                    score(layer.layer_score)
                )?;
            }
            writeln!(self.writer)?;
        }

        if !result.node_table.is_empty() {
            writeln!(self.writer, "## Nodes")?;
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "| Node | Layer | Knitting | Bridging | Channeling | Reaching | Composite |"
            )?;
            writeln!(
                self.writer,
                "|------|-------|----------|----------|------------|----------|-----------|"
            )?;
            for node in &result.node_table {
                writeln!(
                    self.writer,
                    "| {} | {} | {} | {} | {} | {} | {} |",
                    node.id,
                    node.layer,
                    score(node.knitting),
                    score(node.bridging),
                    score(node.channeling),
                    score(node.reaching),
                    score(node.composite_score)
                )?;
            }
            writeln!(self.writer)?;
        }

        if !result.degradations.is_empty() {
            writeln!(self.writer, "## Degraded Metrics")?;
            writeln!(self.writer)?;
            for degradation in &result.degradations {
                writeln!(
                    self.writer,
                    "- `{}`: {}",
                    degradation.metric, degradation.reason
                )?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        match report {
            Report::Alignment(result) => self.print_alignment(result)?,
            Report::Dynamics(result) => self.print_dynamics(result)?,
            Report::Cascade(result) => self.print_cascade(result)?,
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Colour a balance-style score: high is good.
fn colored_score(value: f64) -> ColoredString {
    let text = score(value);
    match value {
        v if v.is_nan() => text.dimmed(),
        v if v >= 0.75 => text.green(),
        v if v >= 0.5 => text.yellow(),
        _ => text.red(),
    }
}

fn colored_optional(value: Option<f64>) -> ColoredString {
    match value {
        Some(v) => colored_score(v),
        None => "N/A".dimmed(),
    }
}

impl<W: Write> TerminalWriter<W> {
    fn print_header(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", title.bold().blue())?;
        writeln!(self.writer, "{}", "=".repeat(title.len()).blue())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_alignment(&mut self, result: &AlignmentResult) -> anyhow::Result<()> {
        self.print_header("Alignment Analysis")?;
        writeln!(self.writer, "Summary:")?;
        writeln!(self.writer, "  Categories: {}", result.table.len())?;
        writeln!(self.writer, "  ICC: {}", optional(result.icc_value))?;
        writeln!(
            self.writer,
            "  Alignment score: {}",
            colored_optional(result.alignment_score)
        )?;
        writeln!(self.writer)?;

        for row in result.plot_data.iter().filter(|r| r.role == PlotRole::Overall) {
            let summary = result.category(&row.category);
            writeln!(
                self.writer,
                "  {} - researcher: {}, partner: {}, overall: {}",
                row.category.yellow(),
                optional(summary.and_then(|s| s.researcher_median)),
                optional(summary.and_then(|s| s.partner_median)),
                colored_optional(row.rating)
            )?;
        }
        Ok(())
    }

    fn print_dynamics(&mut self, result: &DynamicsResult) -> anyhow::Result<()> {
        self.print_header("Dynamics Analysis")?;
        writeln!(self.writer, "Summary:")?;
        writeln!(self.writer, "  Domains: {}", result.domain_table.len())?;
        writeln!(
            self.writer,
            "  Dynamics score: {}",
            colored_score(result.dynamics_score)
        )?;
        writeln!(self.writer)?;

        writeln!(self.writer, "Domains:")?;
        for domain in &result.domain_table {
            writeln!(
                self.writer,
                "  {}: {}",
                domain.domain.yellow(),
                score(domain.domain_score)
            )?;
        }
        Ok(())
    }

    fn print_cascade(&mut self, result: &CascadeResult) -> anyhow::Result<()> {
        self.print_header("Cascade Analysis")?;
        writeln!(self.writer, "Summary:")?;
        writeln!(self.writer, "  Nodes: {}", result.node_table.len())?;
        writeln!(
            self.writer,
            "  Cascade score: {}",
            colored_score(result.cascade_score)
        )?;
        writeln!(
            self.writer,
            "  Topology score: {}",
            score(result.topology_score)
        )?;
        writeln!(self.writer)?;

        if !result.layer_summary.is_empty() {
            writeln!(self.writer, "Layers:")?;
            for layer in &result.layer_summary {
                writeln!(
                    self.writer,
                    "  {} ({} nodes) - knitting: {}, bridging: {}, channeling: {}, reaching: {}, score: {}",
                    layer.label.yellow(),
                    layer.count,
                    score(layer.mean_knitting),
                    score(layer.mean_bridging),
                    score(layer.mean_channeling),
                    score(layer.mean_reaching),
                    score(layer.layer_score)
                )?;
            }
            writeln!(self.writer)?;
        }

        for degradation in &result.degradations {
            writeln!(
                self.writer,
                "{} {}: {}",
                "warning:".yellow().bold(),
                degradation.metric,
                degradation.reason
            )?;
        }
        Ok(())
    }
}

pub fn create_writer(format: OutputFormat, destination: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(destination)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(destination)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(destination)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze_alignment, analyze_cascade, analyze_dynamics};
    use crate::core::{DynamicsRecord, NetworkEdge, RatingRecord, Role};

    fn render(writer: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut buffer = Vec::new();
        writer(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn single_category_alignment() -> Report {
        let records = vec![
            RatingRecord::new(Role::Researcher, "trust", 0.8),
            RatingRecord::new(Role::Partner, "trust", 0.6),
        ];
        Report::Alignment(analyze_alignment(&records).unwrap())
    }

    #[test]
    fn test_json_is_tagged_with_analysis() {
        let report = single_category_alignment();
        let output = render(|buf| JsonWriter::new(buf).write_report(&report));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["analysis"], "alignment");
        // A single category cannot yield an ICC
        assert!(value["alignment_score"].is_null());
    }

    #[test]
    fn test_markdown_renders_missing_scores() {
        let report = single_category_alignment();
        let output = render(|buf| MarkdownWriter::new(buf).write_report(&report));

        assert!(output.contains("# Alignment Analysis"));
        assert!(output.contains("| Alignment score | N/A |"));
        assert!(output.contains("| trust | 0.80 | 0.60 |"));
    }

    #[test]
    fn test_markdown_dynamics_tables() {
        let records = vec![
            DynamicsRecord::new("context", "trust", 0.5, 0.5),
            DynamicsRecord::new("partnership", "power", 1.0, 1.0),
        ];
        let report = Report::Dynamics(analyze_dynamics(&records).unwrap());
        let output = render(|buf| MarkdownWriter::new(buf).write_report(&report));

        assert!(output.contains("## Domains"));
        assert!(output.contains("| context | 0.25 |"));
        assert!(output.contains("| partnership | 1.00 |"));
    }

    #[test]
    fn test_markdown_cascade_lists_degradations() {
        let edges = vec![NetworkEdge::new("a", "b", 1)];
        let report = Report::Cascade(analyze_cascade(&edges, 1.0).unwrap());
        let output = render(|buf| MarkdownWriter::new(buf).write_report(&report));

        assert!(output.contains("| 1st degree | 2 |"));
        assert!(output.contains("## Degraded Metrics"));
        assert!(output.contains("`global_alpha`"));
    }

    #[test]
    fn test_terminal_writer_summarises_cascade() {
        colored::control::set_override(false);
        let edges = vec![
            NetworkEdge::new("ego", "a", 1),
            NetworkEdge::new("a", "b", 2),
        ];
        let report = Report::Cascade(analyze_cascade(&edges, 0.9).unwrap());
        let output = render(|buf| TerminalWriter::new(buf).write_report(&report));

        assert!(output.contains("Cascade Analysis"));
        assert!(output.contains("1st degree (2 nodes)"));
        assert!(output.contains("2nd degree (1 nodes)"));
    }

    #[test]
    fn test_score_formatting() {
        assert_eq!(score(f64::NAN), "NaN");
        assert_eq!(score(0.456), "0.46");
        assert_eq!(optional(None), "N/A");
    }
}
