use crate::io::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "engagemap")]
#[command(about = "Alignment, dynamics and cascade metrics for research partnerships", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every analysis command
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Input file (.json, .yaml or .yml)
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file (defaults to the nearest .engagemap.toml)
    #[arg(short, long, env = "ENGAGEMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare researcher and partner ratings per category
    Alignment {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Score how evenly effort spreads across domains
    Dynamics {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Score how evenly influence spreads across network layers
    Cascade {
        #[command(flatten)]
        common: CommonArgs,

        /// Alpha centrality damping (overrides the configuration file)
        #[arg(long)]
        alpha: Option<f64>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    /// Verbosity requested on the command line; `init` has none.
    pub fn verbosity(&self) -> u8 {
        match self {
            Commands::Alignment { common }
            | Commands::Dynamics { common }
            | Commands::Cascade { common, .. } => common.verbosity,
            Commands::Init { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cascade_with_alpha() {
        let cli = Cli::try_parse_from([
            "engagemap",
            "cascade",
            "edges.json",
            "--alpha",
            "0.5",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();

        match &cli.command {
            Commands::Cascade { common, alpha } => {
                assert_eq!(*alpha, Some(0.5));
                assert_eq!(common.format, OutputFormat::Json);
                assert_eq!(common.input, PathBuf::from("edges.json"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.command.verbosity(), 2);
    }

    #[test]
    fn test_default_format_is_terminal() {
        let cli = Cli::try_parse_from(["engagemap", "dynamics", "rows.yaml"]).unwrap();
        let Commands::Dynamics { common } = cli.command else {
            panic!("expected dynamics");
        };
        assert_eq!(common.format, OutputFormat::Terminal);
        assert!(common.output.is_none());
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["engagemap", "alignment"]).is_err());
    }
}
