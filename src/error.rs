use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Failed to read source artifact {}: {source}", .path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source artifact is not valid UTF-8: {}", .path.display())]
    SourceEncoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file {}: {source}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ExtractorError {
    fn user_message(&self) -> String {
        match self {
            ExtractorError::SourceRead { path, source } => {
                if source.kind() == std::io::ErrorKind::NotFound {
                    format!("Source artifact not found: {}", path.display())
                } else {
                    format!("Could not read source artifact {}: {}", path.display(), source)
                }
            }
            ExtractorError::SourceEncoding { path, source } => {
                format!(
                    "Source artifact {} is not valid UTF-8 (invalid byte at offset {})",
                    path.display(),
                    source.utf8_error().valid_up_to()
                )
            }
            ExtractorError::CreateDirectory { path, source } => {
                format!("Could not create directory {}: {}", path.display(), source)
            }
            ExtractorError::WriteFile { path, source } => {
                format!("Could not write {}: {}", path.display(), source)
            }
            ExtractorError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ExtractorError::SourceRead { .. } => Some(
                "Run the command from the directory containing the artifact, or pass its path as the first argument.".to_string()
            ),
            ExtractorError::SourceEncoding { .. } => Some(
                "Re-save the artifact as UTF-8 text and try again.".to_string()
            ),
            ExtractorError::CreateDirectory { .. } | ExtractorError::WriteFile { .. } => Some(
                "Ensure you have write permission for the output directory, or choose another one with --output-dir.".to_string()
            ),
            ExtractorError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_missing_source_message() {
        let error = ExtractorError::SourceRead {
            path: PathBuf::from("sop-assistant-files.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(error.user_message().contains("not found"));
        assert!(error.user_message().contains("sop-assistant-files.txt"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_encoding_error_reports_offset() {
        let bad = String::from_utf8(vec![b'o', b'k', 0xff]).unwrap_err();
        let error = ExtractorError::SourceEncoding {
            path: PathBuf::from("artifact.txt"),
            source: bad,
        };
        assert!(error.user_message().contains("offset 2"));
    }

    #[test]
    fn test_io_error_has_no_suggestion() {
        let error = ExtractorError::Io(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(error.suggestion().is_none());
        assert!(error.user_message().contains("boom"));
    }
}
