//! Where rendered documents go.
//!
//! Paths handed to a sink are relative to the site root (for example
//! `_posts/about-us/jane-doe.md`).

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// Receiver for directories and files produced by an import.
pub trait FileSink {
    /// Create `dir` and any missing parents. Must be safe to repeat.
    fn ensure_dir(&mut self, dir: &Path) -> io::Result<()>;

    /// Write `contents` to `path`, replacing any existing file.
    fn write_file(&mut self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Writes to the real file system below a root directory.
#[derive(Debug, Clone)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileSink for FsSink {
    fn ensure_dir(&mut self, dir: &Path) -> io::Result<()> {
        std::fs::create_dir_all(self.root.join(dir))
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(self.root.join(path), contents)
    }
}

/// Keeps everything in memory. Used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dirs(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    /// Files in path order.
    pub fn files(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.files.iter().map(|(p, c)| (p.as_path(), c.as_str()))
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

impl FileSink for MemorySink {
    fn ensure_dir(&mut self, dir: &Path) -> io::Result<()> {
        for ancestor in dir.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                self.dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            if !self.dirs.contains(parent) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("directory {} does not exist", parent.display()),
                ));
            }
        }
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
