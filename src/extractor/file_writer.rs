use crate::error::{ExtractorError, Result};
use crate::parser::{ExtractedFile, PathFilter};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Serialize)]
pub struct WrittenFile {
    pub path: String,
    pub bytes: u64,
}

#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub files_written: usize,
    pub bytes_written: u64,
    pub current_file: Option<String>,
    pub written: Vec<WrittenFile>,
    pub start_time: Instant,
}

impl ExtractionProgress {
    pub fn new() -> Self {
        Self {
            files_written: 0,
            bytes_written: 0,
            current_file: None,
            written: Vec::new(),
            start_time: Instant::now(),
        }
    }

    pub fn record_file(&mut self, path: String, bytes: u64) {
        self.files_written += 1;
        self.bytes_written += bytes;
        self.current_file = Some(path.clone());
        self.written.push(WrittenFile { path, bytes });
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Materializes extracted records under a base directory.
///
/// Existing files are overwritten. The first failing record aborts the run;
/// records already written stay on disk.
pub struct FileWriter {
    base_dir: PathBuf,
    filter: PathFilter,
}

impl FileWriter {
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
            filter: PathFilter::new(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn extract_files(
        &self,
        files: &[ExtractedFile],
        progress_callback: Option<&dyn Fn(&ExtractionProgress)>,
    ) -> Result<ExtractionProgress> {
        let mut progress = ExtractionProgress::new();

        for file in files {
            let bytes = self.write_record(file)?;
            progress.record_file(file.path.clone(), bytes);

            if let Some(callback) = progress_callback {
                callback(&progress);
            }
        }

        Ok(progress)
    }

    /// Write one record, creating its parent directories first.
    pub fn write_record(&self, file: &ExtractedFile) -> Result<u64> {
        let dest = self.destination(file);

        if let Some(parent) = self.filter.parent_dir(&dest) {
            fs::create_dir_all(parent).map_err(|source| ExtractorError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&dest, file.content.as_bytes()).map_err(|source| {
            ExtractorError::WriteFile {
                path: dest.clone(),
                source,
            }
        })?;

        Ok(file.size())
    }

    pub fn destination(&self, file: &ExtractedFile) -> PathBuf {
        self.filter.resolve(&file.path, &self.base_dir)
    }
}
