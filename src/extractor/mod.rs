pub mod file_writer;
pub mod report;

pub use file_writer::{ExtractionProgress, FileWriter, WrittenFile};
pub use report::{ExtractionReport, ExtractionSummary};
