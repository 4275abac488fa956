use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "artifact-extractor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Split a markdown artifact of fenced file blocks into files")]
#[command(
    long_about = "Reads an artifact made of `### <path>` headers each followed by a fenced \
                  code block, and writes every block to its path, creating directories \
                  as needed. Existing files are overwritten."
)]
#[command(after_help = "EXAMPLES:\n  \
    artifact-extractor\n  \
    artifact-extractor bundle.md --output-dir generated\n  \
    artifact-extractor --dry-run --output-format json\n  \
    artifact-extractor --generate-config")]
pub struct Cli {
    /// Artifact to extract (defaults to sop-assistant-files.txt)
    pub source: Option<PathBuf>,

    /// Directory that relative output paths are resolved against
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be written without writing)
    #[arg(long, help = "List the files that would be created without writing them")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_source(self.source.clone())
            .with_output_dir(self.output_dir.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["artifact-extractor"]).unwrap();

        assert!(cli.source.is_none());
        assert!(!cli.dry_run);
        assert_eq!(cli.verbosity_level(), 0);

        let overrides = cli.create_cli_overrides();
        assert!(overrides.source.is_none());
        assert!(overrides.output_dir.is_none());
    }

    #[test]
    fn test_source_and_output_dir() {
        let cli =
            Cli::try_parse_from(["artifact-extractor", "bundle.md", "-o", "generated"]).unwrap();

        assert_eq!(cli.source, Some(PathBuf::from("bundle.md")));
        assert_eq!(cli.output_dir, Some(PathBuf::from("generated")));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["artifact-extractor", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        let cli = Cli::try_parse_from(["artifact-extractor", "-vv"]).unwrap();
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::try_parse_from(["artifact-extractor", "--quiet"]).unwrap();
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_output_format_parsing() {
        let cli = Cli::try_parse_from(["artifact-extractor", "--output-format", "json"]).unwrap();
        assert!(matches!(cli.output_format, OutputFormat::Json));
    }
}
