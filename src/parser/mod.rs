pub mod path_filter;
pub mod section_parser;

pub use path_filter::PathFilter;
pub use section_parser::{
    normalize_source, ExtractedFile, ParseOutcome, SectionParser, SkippedSection,
};
