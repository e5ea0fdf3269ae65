//! Ordered list of imported documents.

use crate::validator::{Domain, DuplicateValidator};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extension accepted for import, compared case-insensitively.
pub const DOCUMENT_EXTENSION: &str = "pdf";

/// Why a path was not imported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("No file path provided")]
    Empty,
    #[error("File does not exist")]
    Missing,
    #[error("Path is not a file")]
    NotAFile,
    #[error("File is not a PDF")]
    UnsupportedExtension,
    #[error("This PDF file is already imported")]
    Duplicate,
}

/// Check that `path` names an existing PDF file.
pub fn validate_document_path(path: &Path) -> Result<(), ImportError> {
    if path.as_os_str().is_empty() {
        return Err(ImportError::Empty);
    }
    if !path.exists() {
        return Err(ImportError::Missing);
    }
    if !path.is_file() {
        return Err(ImportError::NotAFile);
    }
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(DOCUMENT_EXTENSION));
    if !is_pdf {
        return Err(ImportError::UnsupportedExtension);
    }
    Ok(())
}

/// Result of a batch import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub added: usize,
    pub rejected: Vec<(PathBuf, ImportError)>,
}

/// Imported documents, in import order, without duplicates.
#[derive(Debug, Clone, Default)]
pub struct ImportList {
    files: Vec<PathBuf>,
    validator: DuplicateValidator,
}

impl ImportList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append each path. Rejections do not stop the batch.
    pub fn add_files<I, P>(&mut self, paths: I) -> ImportReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut report = ImportReport::default();
        for path in paths {
            let path = path.as_ref();
            match self.add_file(path) {
                Ok(()) => report.added += 1,
                Err(e) => {
                    log::warn!("Not importing {}: {}", path.display(), e);
                    report.rejected.push((path.to_path_buf(), e));
                }
            }
        }
        report
    }

    /// Validate and append one path.
    pub fn add_file(&mut self, path: &Path) -> Result<(), ImportError> {
        validate_document_path(path)?;
        let key = path.to_string_lossy();
        if !self.validator.add(Domain::File, &key) {
            return Err(ImportError::Duplicate);
        }
        self.files.push(path.to_path_buf());
        Ok(())
    }

    /// Remove the entry at `index`. Returns false if out of range.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.files.len() {
            return false;
        }
        let path = self.files.remove(index);
        self.validator.remove(Domain::File, &path.to_string_lossy());
        true
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.validator.clear(Domain::File);
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.files.get(index).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
