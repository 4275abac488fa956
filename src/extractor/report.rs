use crate::extractor::{ExtractionProgress, WrittenFile};
use crate::parser::{ParseOutcome, SkippedSection};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub source: String,
    pub output_directory: String,
    pub extraction_time: DateTime<Utc>,
    pub dry_run: bool,
    pub summary: ExtractionSummary,
    pub files: Vec<WrittenFile>,
    pub skipped: Vec<SkippedSection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionSummary {
    pub files_written: usize,
    pub bytes_written: u64,
    pub sections_skipped: usize,
    pub duration: Duration,
}

impl ExtractionReport {
    /// Report for a run that actually wrote files.
    pub fn from_progress(
        source: &Path,
        output_directory: &Path,
        outcome: &ParseOutcome,
        progress: &ExtractionProgress,
    ) -> Self {
        Self {
            source: source.display().to_string(),
            output_directory: output_directory.display().to_string(),
            extraction_time: Utc::now(),
            dry_run: false,
            summary: ExtractionSummary {
                files_written: progress.files_written,
                bytes_written: progress.bytes_written,
                sections_skipped: outcome.skipped.len(),
                duration: progress.elapsed(),
            },
            files: progress.written.clone(),
            skipped: outcome.skipped.clone(),
        }
    }

    /// Report of what a run would write, without touching the filesystem.
    pub fn planned(source: &Path, output_directory: &Path, outcome: &ParseOutcome) -> Self {
        let files: Vec<WrittenFile> = outcome
            .files
            .iter()
            .map(|f| WrittenFile {
                path: f.path.clone(),
                bytes: f.size(),
            })
            .collect();

        Self {
            source: source.display().to_string(),
            output_directory: output_directory.display().to_string(),
            extraction_time: Utc::now(),
            dry_run: true,
            summary: ExtractionSummary {
                files_written: files.len(),
                bytes_written: outcome.total_bytes(),
                sections_skipped: outcome.skipped.len(),
                duration: Duration::ZERO,
            },
            files,
            skipped: outcome.skipped.clone(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SectionParser;

    const ARTIFACT: &str = "### Overview\n```\nprose\n```\n### a.txt\n```\nA\n```\n### b/c.txt\n```\nBCD\n```\n";

    #[test]
    fn test_planned_report() {
        let outcome = SectionParser::new().parse(ARTIFACT);
        let report = ExtractionReport::planned(Path::new("artifact.txt"), Path::new("."), &outcome);

        assert!(report.dry_run);
        assert_eq!(report.summary.files_written, 2);
        assert_eq!(report.summary.bytes_written, 4);
        assert_eq!(report.summary.sections_skipped, 1);
        assert_eq!(report.skipped[0].header, "Overview");
    }

    #[test]
    fn test_report_from_progress() {
        let outcome = SectionParser::new().parse(ARTIFACT);
        let mut progress = ExtractionProgress::new();
        progress.record_file("a.txt".to_string(), 1);

        let report = ExtractionReport::from_progress(
            Path::new("artifact.txt"),
            Path::new("out"),
            &outcome,
            &progress,
        );

        assert!(!report.dry_run);
        assert_eq!(report.summary.files_written, 1);
        assert_eq!(report.files[0].path, "a.txt");
        assert_eq!(report.output_directory, "out");
    }

    #[test]
    fn test_report_json() {
        let outcome = SectionParser::new().parse(ARTIFACT);
        let report = ExtractionReport::planned(Path::new("artifact.txt"), Path::new("."), &outcome);

        let value: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(value["source"], "artifact.txt");
        assert_eq!(value["files"][1]["path"], "b/c.txt");
        assert_eq!(value["skipped"][0]["line"], 1);
    }
}
