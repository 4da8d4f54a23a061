//! Loading and saving one collection file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::NormalizeError;

/// A film collection on disk, read and written whole.
#[derive(Debug, Clone)]
pub struct CollectionFile {
    path: PathBuf,
}

impl CollectionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Value, NormalizeError> {
        let data = fs::read(&self.path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => NormalizeError::FileNotFound {
                path: self.path.clone(),
            },
            _ => NormalizeError::Read {
                path: self.path.clone(),
                source,
            },
        })?;

        let collection = serde_json::from_slice(&data).map_err(|source| NormalizeError::Parse {
            path: self.path.clone(),
            source,
        })?;

        debug!("Loaded {} ({} bytes)", self.path.display(), data.len());
        Ok(collection)
    }

    /// Write the collection back, replacing the file atomically.
    ///
    /// Output is two-space indented with non-ASCII text kept as is.
    pub fn save(&self, collection: &Value) -> Result<(), NormalizeError> {
        let encoded =
            serde_json::to_string_pretty(collection).map_err(|source| NormalizeError::Serialize {
                path: self.path.clone(),
                source,
            })?;

        let temp_path = self.temp_path();
        let written = fs::write(&temp_path, encoded.as_bytes())
            .and_then(|_| fs::rename(&temp_path, &self.path));

        if let Err(source) = written {
            if temp_path.exists() {
                if let Err(e) = fs::remove_file(&temp_path) {
                    warn!("Failed to remove {}: {}", temp_path.display(), e);
                }
            }
            return Err(NormalizeError::Write {
                path: self.path.clone(),
                source,
            });
        }

        debug!("Saved {} ({} bytes)", self.path.display(), encoded.len());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}
