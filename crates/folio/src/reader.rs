//! The document reader (placeholder).
//!
//! Opening a document records its identity; pagination and content
//! rendering are not implemented yet.

use std::io;
use std::path::{Path, PathBuf};

/// An opened document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDocument {
    path: PathBuf,
    title: String,
}

impl OpenDocument {
    /// Open the document at `path`.
    ///
    /// # Errors
    /// Returns `NotFound` when the path is not an existing file.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such document: {}", path.display()),
            ));
        }
        let title = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("untitled")
            .to_string();
        Ok(Self { path, title })
    }

    /// Title derived from the file name.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Location of the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_derives_title_from_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moby-dick.epub");
        std::fs::write(&path, b"").unwrap();

        let document = OpenDocument::open(&path).unwrap();
        assert_eq!(document.title(), "moby-dick");
        assert_eq!(document.path(), path);
    }

    #[test]
    fn open_missing_document_fails() {
        let err = OpenDocument::open("/nonexistent/book.epub").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
