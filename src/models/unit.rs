use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::{ManifestError, UnitError};

/// One decoded manifest.
///
/// Missing fields (and explicit `null`s) decode as empty; unknown fields are
/// ignored. `class` is used verbatim in the stub declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UnitDescriptor {
    /// Expected to equal the manifest's own file name (checked in strict mode).
    #[serde(rename = "File", alias = "file", deserialize_with = "null_as_default")]
    pub file: String,
    #[serde(rename = "Class", alias = "class", deserialize_with = "null_as_default")]
    pub class: String,
    #[serde(rename = "Author", alias = "author", deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(rename = "Purpose", alias = "purpose", deserialize_with = "null_as_default")]
    pub purpose: String,
    /// Revisions whose companion source is appended, in order. Duplicates re-emit.
    #[serde(
        rename = "Functions",
        alias = "functions",
        deserialize_with = "null_as_default"
    )]
    pub functions: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl UnitDescriptor {
    /// Read and decode the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let bytes = std::fs::read(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&bytes).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Strict-mode check: the declared `File` must equal the manifest's base name.
    pub fn validate_name(&self, manifest_file_name: &str) -> Result<(), UnitError> {
        if self.file == manifest_file_name {
            Ok(())
        } else {
            Err(UnitError::NameMismatch {
                declared: self.file.clone(),
                actual: manifest_file_name.to_string(),
            })
        }
    }
}
