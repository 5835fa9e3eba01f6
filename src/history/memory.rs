use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use super::HistoryStore;
use crate::error::ResolutionError;

/// In-memory history keyed by `(revision, path)`.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    files: HashMap<(String, PathBuf), Vec<u8>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `content` as the state of `path` at `revision`.
    pub fn insert(
        &mut self,
        revision: impl Into<String>,
        path: impl Into<PathBuf>,
        content: impl Into<Vec<u8>>,
    ) -> &mut Self {
        self.files
            .insert((revision.into(), path.into()), content.into());
        self
    }

    pub fn with(
        mut self,
        revision: impl Into<String>,
        path: impl Into<PathBuf>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        self.insert(revision, path, content);
        self
    }
}

impl HistoryStore for MemoryHistory {
    fn resolve<'a>(
        &'a self,
        revision: &str,
        path: &Path,
    ) -> Result<Box<dyn Read + 'a>, ResolutionError> {
        self.files
            .get(&(revision.to_string(), path.to_path_buf()))
            .map(|content| Box::new(Cursor::new(content.as_slice())) as Box<dyn Read + 'a>)
            .ok_or_else(|| ResolutionError::new(revision, path, "not found in history"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_inserted_content() {
        let history = MemoryHistory::new().with("r1", "a.js", "one\n");
        let mut out = String::new();
        history
            .resolve("r1", Path::new("a.js"))
            .expect("resolve")
            .read_to_string(&mut out)
            .expect("read");
        assert_eq!(out, "one\n");
    }

    #[test]
    fn test_missing_revision_names_revision_and_path() {
        let history = MemoryHistory::new().with("r1", "a.js", "one\n");
        let err = history.resolve("r2", Path::new("a.js")).err().expect("should fail");
        assert_eq!(err.revision, "r2");
        assert_eq!(err.path, PathBuf::from("a.js"));
    }
}
