//! The document library (placeholder).
//!
//! For now the library is a flat extension scan over one directory.
//! Collections, metadata, and reading progress arrive with the document
//! pipeline.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File extensions the library recognizes as documents.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["epub", "md", "txt"];

/// Lists candidate documents under a root directory.
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
}

impl Library {
    /// Create a library over `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The library's root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Documents directly under the root, sorted by path.
    ///
    /// # Errors
    /// Returns the underlying I/O error when the root cannot be read.
    pub fn documents(&self) -> io::Result<Vec<PathBuf>> {
        let mut documents: Vec<PathBuf> = fs::read_dir(&self.root)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| is_document(path))
            .collect();
        documents.sort();
        Ok(documents)
    }
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}
