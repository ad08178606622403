//! Destinations for generated files.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Receives generated files by path relative to the site root.
pub trait OutputSink {
    /// Writes one file, replacing an earlier write to the same path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the file cannot be stored
    fn write(&mut self, path: &str, contents: &[u8]) -> Result<()>;
}

/// Writes files below a directory on disk.
#[derive(Debug, Clone)]
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    /// Creates sink, creating the root directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| Error::Write {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Output directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves relative output path below the root.
    ///
    /// Only plain components are accepted so nothing lands outside the
    /// output directory.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let plain = !path.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !plain {
            return Err(Error::Write {
                path: relative.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "output path must stay inside the output directory",
                ),
            });
        }
        Ok(self.root.join(relative))
    }
}

impl OutputSink for DirSink {
    fn write(&mut self, path: &str, contents: &[u8]) -> Result<()> {
        let target = self.resolve(path)?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&target, contents).map_err(|source| Error::Write {
            path: target,
            source,
        })
    }
}

/// Keeps generated files in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySink {
    /// Creates empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns file contents as text, if written and valid UTF-8.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .get(path)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Returns raw file contents.
    pub fn bytes(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Written paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Number of distinct files written.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns whether nothing was written.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl OutputSink for MemorySink {
    fn write(&mut self, path: &str, contents: &[u8]) -> Result<()> {
        self.files.insert(path.to_string(), contents.to_vec());
        Ok(())
    }
}
