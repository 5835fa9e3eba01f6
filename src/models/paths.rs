use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::UnitError;

pub const MANIFEST_EXTENSION: &str = "json";
pub const SOURCE_EXTENSION: &str = "js";

/// Paths derived from one input, all relative to the repository root.
///
/// `src/athena.json`, `src/athena.js` and `./src/athena` all name the same
/// unit: manifest `src/athena.json`, companion source `src/athena.js`.
/// Both paths are always relative and never climb above the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPaths {
    pub manifest: PathBuf,
    pub source: PathBuf,
}

impl UnitPaths {
    /// Derive unit paths from an input.
    ///
    /// Absolute inputs must lie under `root` once both are canonicalized;
    /// anything that ends up outside the root is rejected.
    pub fn derive(root: &Path, input: &str) -> Result<Self, UnitError> {
        let outside = || UnitError::OutsideRoot {
            input: input.to_string(),
            root: root.to_path_buf(),
        };

        let path = Path::new(input);
        let relative = if path.is_absolute() {
            canonical_input(path)
                .strip_prefix(canonical(root))
                .map_err(|_| outside())?
                .to_path_buf()
        } else {
            path.to_path_buf()
        };

        let mut stem = PathBuf::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => stem.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !stem.pop() {
                        return Err(outside());
                    }
                }
                Component::RootDir | Component::Prefix(_) => return Err(outside()),
            }
        }
        if stem.as_os_str().is_empty() {
            return Err(outside());
        }
        stem.set_extension("");

        Ok(Self {
            manifest: append_extension(&stem, MANIFEST_EXTENSION),
            source: append_extension(&stem, SOURCE_EXTENSION),
        })
    }

    /// Base name of the manifest, compared against `File` in strict mode.
    pub fn manifest_file_name(&self) -> String {
        self.manifest
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Per-unit output location, always nested under `output_root`.
    pub fn output_in(&self, output_root: &Path) -> PathBuf {
        let mut output = output_root.to_path_buf();
        output.extend(
            self.source
                .components()
                .filter(|c| matches!(c, Component::Normal(_))),
        );
        output
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

// The input itself may not exist (`athena` with no extension), so resolve
// its directory and keep the file name as given.
fn canonical_input(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => canonical(parent).join(name),
        _ => path.to_path_buf(),
    }
}

// `with_extension` would replace an inner dot (`a.v2` -> `a.json`).
fn append_extension(stem: &Path, extension: &str) -> PathBuf {
    let mut path = stem.as_os_str().to_os_string();
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}
