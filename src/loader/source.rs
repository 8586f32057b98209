//! Raw-text providers for period files and the combined portfolio file
//!
//! The assembler only needs `name -> text` for a set of period files and
//! `() -> text` for the combined file, so any backend that can supply those
//! can stand in for the filesystem.

use crate::error::{DashboardError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A set of named text files
pub trait TableSource: Send + Sync {
    /// Names of every file in the set (not filtered)
    fn names(&self) -> Result<Vec<String>>;

    /// Full text of one file
    fn read(&self, name: &str) -> Result<String>;
}

/// A single text file
pub trait TextSource: Send + Sync {
    fn read_text(&self) -> Result<String>;
}

/// Files directly inside one directory (not recursive)
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TableSource for DirectorySource {
    fn names(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Err(DashboardError::MissingSource(self.dir.clone()));
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }

    fn read(&self, name: &str) -> Result<String> {
        Ok(fs::read_to_string(self.dir.join(name))?)
    }
}

/// One file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TextSource for FileSource {
    fn read_text(&self) -> Result<String> {
        if !self.path.is_file() {
            return Err(DashboardError::MissingSource(self.path.clone()));
        }
        Ok(fs::read_to_string(&self.path)?)
    }
}

/// In-memory file set
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(name.into(), text.into());
        self
    }
}

impl TableSource for MemorySource {
    fn names(&self) -> Result<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read(&self, name: &str) -> Result<String> {
        self.files.get(name).cloned().ok_or_else(|| {
            DashboardError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no such file: {}", name),
            ))
        })
    }
}

impl TextSource for String {
    fn read_text(&self) -> Result<String> {
        Ok(self.clone())
    }
}
