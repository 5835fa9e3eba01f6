use std::io::{self, Read};
use std::path::{Path, PathBuf};

use git2::{Blob, ObjectType, Repository};

use super::HistoryStore;
use crate::error::{Error, ResolutionError};

/// History backed by a git repository's object database.
///
/// Revisions are anything `git rev-parse` accepts that peels to a commit:
/// full or abbreviated hashes, tags and branch names.
pub struct GitHistory {
    repo: Repository,
}

impl GitHistory {
    /// Open the repository whose working copy is rooted at `root`.
    pub fn open(root: &Path) -> Result<Self, Error> {
        let repo = Repository::open(root).map_err(|source| Error::Repository {
            path: root.to_path_buf(),
            source,
        })?;
        Ok(Self { repo })
    }

    fn find_blob(&self, revision: &str, path: &Path) -> Result<Blob<'_>, git2::Error> {
        let commit = self.repo.revparse_single(revision)?.peel_to_commit()?;
        let entry = commit.tree()?.get_path(path)?;
        match entry.kind() {
            Some(ObjectType::Blob) => self.repo.find_blob(entry.id()),
            _ => Err(git2::Error::from_str(&format!(
                "{} is not a file in commit {}",
                path.display(),
                commit.id()
            ))),
        }
    }
}

impl HistoryStore for GitHistory {
    fn resolve<'a>(
        &'a self,
        revision: &str,
        path: &Path,
    ) -> Result<Box<dyn Read + 'a>, ResolutionError> {
        let blob = self
            .find_blob(revision, &tree_path(path))
            .map_err(|e| ResolutionError::new(revision, path, e))?;
        Ok(Box::new(BlobReader { blob, pos: 0 }))
    }
}

// Tree lookups want plain relative paths; `./a.js` would not match.
fn tree_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}

/// Reads a blob's content without copying it out of the object.
struct BlobReader<'r> {
    blob: Blob<'r>,
    pos: usize,
}

impl Read for BlobReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = &self.blob.content()[self.pos..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }
}
