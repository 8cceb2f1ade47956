//! CLI argument parsing

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Grant budget calculator
///
/// Computes a multi-year research grant budget with fringe, inflation, and
/// indirect-cost (F&A) rules. Defaults come from a `key = value` parameter
/// file; every value can be overridden at the prompts.
#[derive(Parser, Debug)]
#[command(name = "grantcalc")]
#[command(version)]
#[command(about = "Multi-year research grant budget calculator", long_about = None)]
pub struct Cli {
    /// Parameter file with default rates and amounts
    #[arg(short, long, env = "GRANTCALC_PARAMS")]
    pub params: Option<PathBuf>,

    /// Append-only run log
    #[arg(short, long, env = "GRANTCALC_LOG")]
    pub log: Option<PathBuf>,

    /// Skip the prompts and use the parameter file defaults
    #[arg(short, long)]
    pub defaults: bool,

    /// Output format for the report on stdout
    #[arg(short, long)]
    pub output: Option<OutputFormat>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Report format on stdout. The run log is always a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width table
    Table,
    /// Pretty-printed JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "grantcalc",
            "--params",
            "grant.par",
            "--log",
            "runs.log",
            "--defaults",
            "--output",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.params, Some(PathBuf::from("grant.par")));
        assert_eq!(cli.log, Some(PathBuf::from("runs.log")));
        assert!(cli.defaults);
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_output_format_from_config_string() {
        assert_eq!("table".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
