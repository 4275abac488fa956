use crate::parser::path_filter::PathFilter;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// `### <path>` at the start of a line, then an opening fence with an optional
/// alphabetic language tag, then everything up to the first closing fence.
static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^### ([^\n]+)\n```(?:[a-zA-Z]*\n)?(.*?)```").expect("valid regex")
});

/// Prepare raw artifact text for scanning: drop a leading byte-order mark and
/// turn `\r\n` and lone `\r` line endings into `\n`.
pub fn normalize_source(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    if !text.contains('\r') {
        return text.to_string();
    }

    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// One file block found in the artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedFile {
    pub path: String,
    pub content: String,
    /// 1-based line of the header in the source document.
    pub line: usize,
}

impl ExtractedFile {
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// A fenced section whose header did not look like a file path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSection {
    pub header: String,
    pub line: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub files: Vec<ExtractedFile>,
    pub skipped: Vec<SkippedSection>,
}

impl ParseOutcome {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(ExtractedFile::size).sum()
    }
}

pub struct SectionParser {
    filter: PathFilter,
}

impl SectionParser {
    pub fn new() -> Self {
        Self {
            filter: PathFilter::new(),
        }
    }

    /// Scan the whole document for file sections, in document order.
    ///
    /// Matches never overlap and each block ends at the first closing fence
    /// after it opens. A header whose fence is never closed produces nothing.
    pub fn parse(&self, text: &str) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();
        let mut line_counter = LineCounter::new(text);

        for caps in SECTION_RE.captures_iter(text) {
            let (Some(whole), Some(header), Some(body)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };

            let line = line_counter.line_at(whole.start());
            let path = header.as_str().trim();

            if !self.filter.is_file_path(path) {
                outcome.skipped.push(SkippedSection {
                    header: path.to_string(),
                    line,
                });
                continue;
            }

            outcome.files.push(ExtractedFile {
                path: path.to_string(),
                content: body.as_str().trim().to_string(),
                line,
            });
        }

        outcome
    }
}

impl Default for SectionParser {
    fn default() -> Self {
        Self::new()
    }
}

// Matches arrive in increasing offset order, so lines are counted once.
struct LineCounter<'a> {
    text: &'a str,
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, offset: usize) -> usize {
        self.line += self.text[self.offset..offset].matches('\n').count();
        self.offset = offset;
        self.line
    }
}
