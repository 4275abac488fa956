use std::path::{Path, PathBuf};

/// Decides whether a section header names a file or is just a prose heading.
pub struct PathFilter;

impl PathFilter {
    pub fn new() -> Self {
        Self
    }

    /// A header names a file when it contains a path separator or a dot.
    pub fn is_file_path(&self, candidate: &str) -> bool {
        !candidate.is_empty() && (candidate.contains('/') || candidate.contains('.'))
    }

    /// Resolve a header path against the output directory.
    pub fn resolve(&self, candidate: &str, base_dir: &Path) -> PathBuf {
        base_dir.join(candidate)
    }

    /// Parent directory to create before writing, if any.
    pub fn parent_dir<'a>(&self, path: &'a Path) -> Option<&'a Path> {
        path.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path_detection() {
        let filter = PathFilter::new();

        assert!(filter.is_file_path("notes.md"));
        assert!(filter.is_file_path("src/lib/util.txt"));
        assert!(filter.is_file_path("scripts/setup"));
        assert!(filter.is_file_path(".env"));

        assert!(!filter.is_file_path("Overview"));
        assert!(!filter.is_file_path("Getting Started"));
        assert!(!filter.is_file_path(""));
    }

    #[test]
    fn test_parent_dir() {
        let filter = PathFilter::new();

        assert_eq!(filter.parent_dir(Path::new("notes.md")), None);
        assert_eq!(
            filter.parent_dir(Path::new("src/lib/util.txt")),
            Some(Path::new("src/lib"))
        );
    }

    #[test]
    fn test_resolve_against_base() {
        let filter = PathFilter::new();
        let resolved = filter.resolve("a/b.txt", Path::new("out"));
        assert_eq!(resolved, PathBuf::from("out/a/b.txt"));
    }
}
