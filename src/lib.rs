pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod parser;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, OutputConfig, SourceConfig, DEFAULT_SOURCE};
pub use error::{ExtractorError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{ExtractionProgress, ExtractionReport, ExtractionSummary, FileWriter, WrittenFile};
pub use parser::{ExtractedFile, ParseOutcome, PathFilter, SectionParser, SkippedSection};
pub use ui::{OutputFormatter, OutputMode, ProgressAwareOutput, ProgressManager, COMPLETION_MESSAGE};

use std::fs;
use std::path::Path;

/// Main library interface: reads an artifact and writes its file blocks.
pub struct ArtifactExtractor {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl ArtifactExtractor {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(output_mode == OutputMode::Human && !quiet);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Read the whole source artifact with a leading BOM removed and line
    /// endings normalized to `\n`.
    ///
    /// Fails before anything is written if the file is missing, unreadable,
    /// or not UTF-8.
    pub fn read_source(&self) -> Result<String> {
        let path = &self.config.source.path;

        let bytes = fs::read(path).map_err(|source| ExtractorError::SourceRead {
            path: path.clone(),
            source,
        })?;

        let text = String::from_utf8(bytes).map_err(|source| ExtractorError::SourceEncoding {
            path: path.clone(),
            source,
        })?;

        Ok(parser::normalize_source(&text))
    }

    pub fn parse_source(&self) -> Result<ParseOutcome> {
        let text = self.read_source()?;
        let outcome = SectionParser::new().parse(&text);

        self.output_formatter.debug(&format!(
            "Parsed {} file sections from {}",
            outcome.files.len(),
            self.config.source.path.display()
        ));
        for skipped in &outcome.skipped {
            self.output_formatter.info(&format!(
                "Skipping section '{}' (line {}): not a file path",
                skipped.header, skipped.line
            ));
        }

        Ok(outcome)
    }

    /// Write every file section to disk, in document order.
    pub fn extract(&self) -> Result<ExtractionReport> {
        self.output_formatter.start_operation(&format!(
            "Extracting files from {}",
            self.config.source.path.display()
        ));

        let outcome = self.parse_source()?;
        if outcome.is_empty() {
            self.output_formatter.warning("No file sections found in the source artifact");
        }

        let writer = FileWriter::new(&self.config.output.base_directory);
        let file_progress = self
            .progress_manager
            .create_file_progress(outcome.files.len() as u64);
        let output = ProgressAwareOutput::new(&self.output_formatter, Some(&self.progress_manager));

        let progress_callback = |progress: &ExtractionProgress| {
            ui::progress::update_file_progress(&file_progress, progress);
            if let Some(ref path) = progress.current_file {
                output.file_created(path);
            }
        };

        let result = writer.extract_files(&outcome.files, Some(&progress_callback));
        ui::progress::finish_progress(&file_progress);
        let progress = result?;

        Ok(ExtractionReport::from_progress(
            &self.config.source.path,
            writer.base_dir(),
            &outcome,
            &progress,
        ))
    }

    /// Parse the artifact and list what would be written.
    pub fn dry_run(&self) -> Result<ExtractionReport> {
        self.output_formatter
            .info("DRY RUN MODE - No files will be written");

        let outcome = self.parse_source()?;
        let writer = FileWriter::new(&self.config.output.base_directory);

        for file in &outcome.files {
            self.output_formatter.file_created(&file.path, true);
            self.output_formatter
                .debug(&format!("  -> {}", writer.destination(file).display()));
        }

        Ok(ExtractionReport::planned(
            &self.config.source.path,
            writer.base_dir(),
            &outcome,
        ))
    }

    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn handle_error(&self, error: &ExtractorError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Extract `source` into the current directory with default console output.
pub fn extract<P: AsRef<Path>>(source: P) -> Result<ExtractionReport> {
    let mut config = Config::default();
    config.source.path = source.as_ref().to_path_buf();

    ArtifactExtractor::new(config, OutputMode::Human, 0, false).extract()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn extractor_for(dir: &TempDir, artifact: &str) -> ArtifactExtractor {
        let source = dir.path().join("artifact.txt");
        fs::write(&source, artifact).unwrap();

        let mut config = Config::default();
        config.source.path = source;
        config.output.base_directory = dir.path().join("out");

        ArtifactExtractor::new(config, OutputMode::Plain, 0, true)
    }

    #[test]
    fn test_extract_writes_sections() {
        let dir = TempDir::new().unwrap();
        let extractor = extractor_for(
            &dir,
            "### notes.md\n```\nHello world\n```\n\n### Overview\n```\nskip me\n```\n\n### src/lib/util.txt\n```text\n  util  \n```\n",
        );

        let report = extractor.extract().unwrap();

        assert_eq!(report.summary.files_written, 2);
        assert_eq!(report.summary.sections_skipped, 1);
        let out = dir.path().join("out");
        assert_eq!(fs::read_to_string(out.join("notes.md")).unwrap(), "Hello world");
        assert_eq!(fs::read_to_string(out.join("src/lib/util.txt")).unwrap(), "util");
        assert!(!out.join("Overview").exists());
    }

    #[test]
    fn test_crlf_artifact_with_bom_written_with_lf() {
        let dir = TempDir::new().unwrap();
        let extractor = extractor_for(
            &dir,
            "\u{feff}### src/main.rs\r\n```rust\r\nfn main() {}\r\nlet x = 1;\r\n```\r\n",
        );

        let report = extractor.extract().unwrap();

        assert_eq!(report.summary.files_written, 1);
        let written = fs::read(dir.path().join("out/src/main.rs")).unwrap();
        assert_eq!(written, b"fn main() {}\nlet x = 1;");
    }

    #[test]
    fn test_missing_source_fails_before_writes() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.source.path = dir.path().join("missing.txt");
        config.output.base_directory = dir.path().join("out");

        let extractor = ArtifactExtractor::new(config, OutputMode::Plain, 0, true);
        let result = extractor.extract();

        assert!(matches!(result, Err(ExtractorError::SourceRead { .. })));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_invalid_utf8_source() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("artifact.txt");
        fs::write(&source, [b'#', b'#', b'#', b' ', 0xc3, 0x28]).unwrap();

        let mut config = Config::default();
        config.source.path = source;
        config.output.base_directory = dir.path().join("out");

        let extractor = ArtifactExtractor::new(config, OutputMode::Plain, 0, true);
        assert!(matches!(
            extractor.extract(),
            Err(ExtractorError::SourceEncoding { .. })
        ));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let extractor = extractor_for(&dir, "### a/b.txt\n```\ncontent\n```\n");

        let report = extractor.dry_run().unwrap();

        assert!(report.dry_run);
        assert_eq!(report.files[0].path, "a/b.txt");
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_empty_artifact_succeeds() {
        let dir = TempDir::new().unwrap();
        let extractor = extractor_for(&dir, "just prose, no sections\n");

        let report = extractor.extract().unwrap();
        assert_eq!(report.summary.files_written, 0);
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        ArtifactExtractor::generate_sample_config(&config_path).unwrap();

        let loaded = Config::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.source.path, PathBuf::from(DEFAULT_SOURCE));
    }

    #[test]
    fn test_extract_function_reports_missing_source() {
        let dir = TempDir::new().unwrap();
        let result = extract(dir.path().join("sop-assistant-files.txt"));
        assert!(matches!(result, Err(ExtractorError::SourceRead { .. })));
    }
}
