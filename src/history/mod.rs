//! Read-only access to a file's content at points in history.
//!
//! The assembly engine only sees the [`HistoryStore`] capability, so it runs
//! the same against a git repository ([`GitHistory`]) or an in-memory fake
//! ([`MemoryHistory`]).

mod git;
mod memory;

use std::io::Read;
use std::path::Path;

pub use git::GitHistory;
pub use memory::MemoryHistory;

use crate::error::ResolutionError;

/// Resolves `(revision, path)` to the file's bytes at that revision.
///
/// Implementations must never touch the working copy: content comes from the
/// history store, not the checkout.
pub trait HistoryStore {
    /// Open the content of `path` as it existed at `revision`.
    ///
    /// A missing revision, a missing path and unreadable storage all fail
    /// with [`ResolutionError`] naming the revision and path.
    fn resolve<'a>(
        &'a self,
        revision: &str,
        path: &Path,
    ) -> Result<Box<dyn Read + 'a>, ResolutionError>;
}
