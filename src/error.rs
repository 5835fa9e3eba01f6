//! Error types for a transpile run.
//!
//! Every failure is fatal to the whole run. Errors carry the input, revision
//! and path involved so the top level can log them unchanged.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::cancel::CancelReason;

/// Top-level error returned by [`crate::transpiler::Transpiler::transpile`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("opening repository at {}: {source}", .path.display())]
    Repository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    /// The combined output or output directory could not be created.
    #[error("creating output {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("processing input {input}: {source}")]
    Unit {
        input: String,
        #[source]
        source: UnitError,
    },

    #[error("run cancelled: {reason}")]
    Cancelled { reason: CancelReason },
}

impl Error {
    /// The unit-level failure, if this error came from processing an input.
    pub fn unit_error(&self) -> Option<&UnitError> {
        match self {
            Self::Unit { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure while processing a single unit.
#[derive(Debug, Error)]
pub enum UnitError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("file name in manifest ({declared}) does not match: {actual}")]
    NameMismatch { declared: String, actual: String },

    /// The input does not name a path inside the repository root.
    #[error("input {input} is outside the repository root {}", .root.display())]
    OutsideRoot { input: String, root: PathBuf },

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Creating or writing the unit's sink failed. `target` names what was
    /// being written (an output file, the stub, a revision's content).
    #[error("writing {target}: {source}")]
    Write {
        target: String,
        #[source]
        source: io::Error,
    },
}

/// The manifest could not be read or decoded.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("reading manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("decoding manifest {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A revision or companion file could not be read from history.
///
/// Missing revision, missing path and unreadable storage all map here; the
/// underlying cause is kept only for diagnostics.
#[derive(Debug, Error)]
#[error("resolving {} at revision {revision}: {source}", .path.display())]
pub struct ResolutionError {
    pub revision: String,
    pub path: PathBuf,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl ResolutionError {
    pub fn new(
        revision: impl Into<String>,
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            revision: revision.into(),
            path: path.into(),
            source: source.into(),
        }
    }
}
